use std::{
    fmt::{self, Display, Formatter},
    ops::{Deref, DerefMut},
};

use ahash::AHashMap;
use log::debug;

mod error;
pub use error::GenotypeError;

use crate::ancestry::{AncestryError, Haplotype};
use crate::container::{AlleleCode, AlleleContainer};

/// Identifies one individual within a pedigree.
///
/// Ancestry edges are relational lookups through a [`GenotypeStore`], never
/// owned references across generations; this id is the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(pub u32);

impl Display for IndividualId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for IndividualId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A diploid pair of containers: haplotype 0 and haplotype 1 of one
/// chromosome.
pub type HaplotypePair<A> = [AlleleContainer<A>; 2];

/// All of one individual's genotypes, indexed by chromosome.
#[derive(Debug, Clone, Default)]
pub struct DiploidGenotypes<A: AlleleCode = u8>(Vec<HaplotypePair<A>>);

impl<A: AlleleCode> Deref for DiploidGenotypes<A> {
    type Target = Vec<HaplotypePair<A>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A: AlleleCode> DerefMut for DiploidGenotypes<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<A: AlleleCode> DiploidGenotypes<A> {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add_chromosome(&mut self, pair: HaplotypePair<A>) {
        self.0.push(pair);
    }

    #[must_use]
    pub fn chromosome(&self, index: usize) -> Option<&HaplotypePair<A>> {
        self.0.get(index)
    }
}

/// Indexed store of every individual's genotypes.
///
/// Symbolic containers reference their ancestors by [`IndividualId`];
/// resolving a span therefore goes through this store. Delabeling must be
/// driven founder-to-descendant: an ancestor's containers have to be
/// concrete before any descendant's [`LabelledAlleles::delabel`] reads
/// them.
///
/// [`LabelledAlleles::delabel`]: crate::ancestry::LabelledAlleles::delabel
#[derive(Debug, Clone, Default)]
pub struct GenotypeStore<A: AlleleCode = u8>(AHashMap<IndividualId, DiploidGenotypes<A>>);

impl<A: AlleleCode> Deref for GenotypeStore<A> {
    type Target = AHashMap<IndividualId, DiploidGenotypes<A>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A: AlleleCode> DerefMut for GenotypeStore<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<A: AlleleCode> GenotypeStore<A> {
    #[must_use]
    pub fn new() -> Self {
        Self(AHashMap::new())
    }

    /// All genotypes of one individual.
    pub fn genotypes(&self, id: IndividualId) -> Result<&DiploidGenotypes<A>, GenotypeError> {
        self.0.get(&id).ok_or(GenotypeError::UnknownIndividual(id))
    }

    /// One haplotype of one chromosome of one individual.
    pub fn haplotype(&self, id: IndividualId, chromosome: usize, haplotype: Haplotype) -> Result<&AlleleContainer<A>, GenotypeError> {
        let pair = self
            .genotypes(id)?
            .chromosome(chromosome)
            .ok_or(GenotypeError::UnknownChromosome { individual: id, chromosome })?;
        Ok(&pair[haplotype.index()])
    }

    /// Replace one haplotype of one chromosome of one individual.
    pub fn set_haplotype(
        &mut self,
        id: IndividualId,
        chromosome: usize,
        haplotype: Haplotype,
        container: AlleleContainer<A>,
    ) -> Result<(), GenotypeError> {
        let genotypes = self.0.get_mut(&id).ok_or(GenotypeError::UnknownIndividual(id))?;
        let pair = genotypes
            .get_mut(chromosome)
            .ok_or(GenotypeError::UnknownChromosome { individual: id, chromosome })?;
        pair[haplotype.index()] = container;
        Ok(())
    }

    /// Delabel every symbolic container one individual carries, in place.
    ///
    /// Fails with `UnresolvedAncestry` if any referenced ancestor is itself
    /// still symbolic: callers resolve the pedigree founder-first and call
    /// this per individual in topological order.
    pub fn delabel_individual(&mut self, id: IndividualId) -> Result<(), AncestryError> {
        let mut pending = Vec::new();
        for (chromosome, pair) in self.genotypes(id)?.iter().enumerate() {
            for haplotype in Haplotype::BOTH {
                if let AlleleContainer::Labelled(labelled) = &pair[haplotype.index()] {
                    pending.push((chromosome, haplotype, labelled.clone()));
                }
            }
        }
        debug!("delabeling individual {id}: {} symbolic containers", pending.len());

        for (chromosome, haplotype, labelled) in pending {
            let resolved = labelled.delabel(self)?;
            self.set_haplotype(id, chromosome, haplotype, resolved)?;
        }
        Ok(())
    }
}
