use itertools::izip;
use log::debug;

mod error;
pub use error::IbsError;

use crate::container::{AlleleCode, Alleles, ContainerError};
use crate::genotypes::{GenotypeStore, IndividualId};
use crate::ancestry::Haplotype;

/// Output code marking markers where any of the four input haplotypes is
/// missing.
pub const DEFAULT_MISSING_CODE: u8 = 64;

/// Identity-by-state states between two individuals, across one whole
/// chromosome.
///
/// # Arguments
/// - `store`       : genotype store holding both individuals.
/// - `ind1`, `ind2`: the two individuals to compare.
/// - `chromosome`  : 0-based index of the chromosome to scan.
/// - `missing_code`: output code for markers with missing data. Defaults to
///                   [`DEFAULT_MISSING_CODE`].
///
/// Returns one state per marker: 2 when both haplotypes match in some
/// orientation, 1 when any single haplotype matches, 0 otherwise, with
/// markers missing in either individual overridden to `missing_code`.
/// Sparse genotypes are densified on the fly; symbolic genotypes must be
/// delabeled first.
pub fn get_ibs_states<A: AlleleCode>(
    store: &GenotypeStore<A>,
    ind1: IndividualId,
    ind2: IndividualId,
    chromosome: usize,
    missing_code: Option<u8>,
) -> Result<Vec<u8>, IbsError> {
    let missing_code = missing_code.unwrap_or(DEFAULT_MISSING_CODE);

    let fetch = |individual: IndividualId, haplotype: Haplotype| -> Result<Alleles<A>, IbsError> {
        store
            .haplotype(individual, chromosome, haplotype)?
            .to_dense()
            .map_err(|err| match err {
                ContainerError::SymbolicGenotype => IbsError::SymbolicGenotypes { individual, chromosome },
                other => IbsError::Container(other),
            })
    };

    let (a, b) = (fetch(ind1, Haplotype::Zero)?, fetch(ind1, Haplotype::One)?);
    let (c, d) = (fetch(ind2, Haplotype::Zero)?, fetch(ind2, Haplotype::One)?);

    debug!("IBS scan: {ind1} vs {ind2}, chromosome {chromosome}, {} markers", a.nmark());
    chromwide_ibs(&a, &b, &c, &d, missing_code)
}

/// IBS states across one chromosome, from the four haplotypes directly.
///
/// `(a, b)` belong to one individual and `(c, d)` to the other; all four
/// must be of equal length.
pub fn chromwide_ibs<A: AlleleCode>(
    a: &Alleles<A>,
    b: &Alleles<A>,
    c: &Alleles<A>,
    d: &Alleles<A>,
    missing_code: u8,
) -> Result<Vec<u8>, IbsError> {
    let a_eq_c = a.eq_mask(c)?;
    let a_eq_d = a.eq_mask(d)?;
    let b_eq_c = b.eq_mask(c)?;
    let b_eq_d = b.eq_mask(d)?;

    // ---- Markers with any missing observation get the sentinel, whatever
    //      the four masks say.
    let missing = izip!(a.missing(), b.missing(), c.missing(), d.missing())
        .map(|(a, b, c, d)| a | b | c | d);

    let states = izip!(a_eq_c, a_eq_d, b_eq_c, b_eq_d, missing)
        .map(|(ac, ad, bc, bd, missing)| {
            if missing {
                missing_code
            } else if (ac && bd) || (ad && bc) {
                // Both alleles shared, in either orientation.
                2
            } else if ac || ad || bc || bd {
                // Any cross-genotype sharing is sufficient for IBS = 1.
                1
            } else {
                0
            }
        })
        .collect();
    Ok(states)
}
