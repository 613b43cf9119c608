mod error;
pub use error::ContainerError;

mod code;
pub use code::AlleleCode;

mod dense;
pub use dense::Alleles;

mod sparse;
pub use sparse::SparseAlleles;

use crate::ancestry::LabelledAlleles;

/// Tagged union over the three genotype encodings.
///
/// Every variant answers the same capability set: shape-preserving
/// `empty_like`, sub-range `copy_span` from a compatible source, per-marker
/// missingness, marker count and elementwise equality. Cross-variant
/// operations fail rather than coerce (a symbolic container holds no
/// allele codes to compare against).
#[derive(Debug, Clone, PartialEq)]
pub enum AlleleContainer<A: AlleleCode = u8> {
    Dense(Alleles<A>),
    Sparse(SparseAlleles<A>),
    Labelled(LabelledAlleles),
}

impl<A: AlleleCode> AlleleContainer<A> {
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Dense(_) => "dense",
            Self::Sparse(_) => "sparse",
            Self::Labelled(_) => "labelled",
        }
    }

    /// Whether this container holds concrete allele codes (dense or sparse),
    /// as opposed to symbolic ancestry labels.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Self::Labelled(_))
    }

    #[must_use]
    pub fn nmark(&self) -> usize {
        match self {
            Self::Dense(alleles) => alleles.nmark(),
            Self::Sparse(alleles) => alleles.nmark(),
            Self::Labelled(alleles) => alleles.nmark(),
        }
    }

    /// An empty container of identical shape and encoding.
    pub fn empty_like(&self) -> Result<Self, ContainerError> {
        match self {
            Self::Dense(alleles) => Ok(Self::Dense(alleles.empty_like())),
            Self::Sparse(alleles) => Ok(Self::Sparse(alleles.empty_like()?)),
            Self::Labelled(alleles) => Ok(Self::Labelled(alleles.empty_like())),
        }
    }

    /// Per-marker mask of missing observations. Symbolic containers carry
    /// no missingness until delabeled.
    pub fn missing(&self) -> Result<Vec<bool>, ContainerError> {
        match self {
            Self::Dense(alleles) => Ok(alleles.missing()),
            Self::Sparse(alleles) => Ok(alleles.missing()),
            Self::Labelled(_) => Err(ContainerError::SymbolicGenotype),
        }
    }

    /// The code standing for a missing observation, for concrete variants.
    pub fn missing_code(&self) -> Result<A, ContainerError> {
        match self {
            Self::Dense(alleles) => Ok(alleles.missing_code()),
            Self::Sparse(alleles) => Ok(alleles.missing_code()),
            Self::Labelled(_) => Err(ContainerError::SymbolicGenotype),
        }
    }

    /// Copy the `[start, stop)` marker sub-range from a compatible source.
    /// Sources must share the target's encoding.
    pub fn copy_span(&mut self, source: &Self, start: usize, stop: usize) -> Result<(), ContainerError> {
        match (self, source) {
            (Self::Dense(target), Self::Dense(source)) => target.copy_span(source, start, stop),
            (Self::Sparse(target), Self::Sparse(source)) => target.copy_span(source, start, stop),
            (Self::Labelled(target), Self::Labelled(source)) => target
                .copy_span(source, start, stop)
                .map_err(|err| ContainerError::Ancestry(Box::new(err))),
            (target, source) => {
                Err(ContainerError::UncomparableTypes(target.variant_name(), source.variant_name()))
            }
        }
    }

    /// Elementwise equality between concrete containers. Sparse operands
    /// compare against dense ones by materializing first; symbolic operands
    /// are uncomparable (their equality is span equality, not code
    /// equality).
    pub fn eq_mask(&self, other: &Self) -> Result<Vec<bool>, ContainerError> {
        match (self, other) {
            (Self::Dense(a), Self::Dense(b)) => a.eq_mask(b),
            (Self::Sparse(a), Self::Sparse(b)) => a.eq_mask(b),
            (Self::Sparse(a), Self::Dense(b)) | (Self::Dense(b), Self::Sparse(a)) => a.eq_mask_dense(b),
            (a, b) => Err(ContainerError::UncomparableTypes(a.variant_name(), b.variant_name())),
        }
    }

    /// Materialize into a dense container. Fails on symbolic containers:
    /// delabel first.
    pub fn to_dense(&self) -> Result<Alleles<A>, ContainerError> {
        match self {
            Self::Dense(alleles) => Ok(alleles.clone()),
            Self::Sparse(alleles) => Ok(alleles.todense()),
            Self::Labelled(_) => Err(ContainerError::SymbolicGenotype),
        }
    }
}

impl<A: AlleleCode> From<Alleles<A>> for AlleleContainer<A> {
    fn from(alleles: Alleles<A>) -> Self {
        Self::Dense(alleles)
    }
}

impl<A: AlleleCode> From<SparseAlleles<A>> for AlleleContainer<A> {
    fn from(alleles: SparseAlleles<A>) -> Self {
        Self::Sparse(alleles)
    }
}

impl<A: AlleleCode> From<LabelledAlleles> for AlleleContainer<A> {
    fn from(alleles: LabelledAlleles) -> Self {
        Self::Labelled(alleles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::Haplotype;
    use crate::genotypes::IndividualId;
    use anyhow::Result;

    fn dense(data: &[u8]) -> AlleleContainer {
        AlleleContainer::Dense(Alleles::new(data.to_vec(), None))
    }

    fn sparse(data: &[u8]) -> AlleleContainer {
        AlleleContainer::Sparse(SparseAlleles::new(data, None, None))
    }

    fn labelled(nmark: usize) -> AlleleContainer {
        let founder = LabelledAlleles::founder_chromosome(IndividualId(1), 0, Haplotype::Zero, nmark);
        AlleleContainer::Labelled(founder)
    }

    #[test]
    fn sparse_vs_dense_equality_both_orders() -> Result<()> {
        let a = sparse(&[0, 1, 2, 0]);
        let b = dense(&[0, 1, 1, 0]);
        let expected = vec![true, true, false, true];
        assert_eq!(a.eq_mask(&b)?, expected);
        assert_eq!(b.eq_mask(&a)?, expected);
        Ok(())
    }

    #[test]
    fn labelled_operands_are_uncomparable() {
        let a = labelled(4);
        let b = dense(&[0, 1, 2, 0]);
        assert!(matches!(a.eq_mask(&b), Err(ContainerError::UncomparableTypes("labelled", "dense"))));
    }

    #[test]
    fn cross_variant_copy_fails() {
        let mut target = dense(&[0, 0, 0]);
        let source = sparse(&[1, 2, 1]);
        let result = target.copy_span(&source, 0, 2);
        assert!(matches!(result, Err(ContainerError::UncomparableTypes("dense", "sparse"))));
    }

    #[test]
    fn symbolic_containers_have_no_missingness() {
        assert!(matches!(labelled(4).missing(), Err(ContainerError::SymbolicGenotype)));
        assert!(matches!(labelled(4).to_dense(), Err(ContainerError::SymbolicGenotype)));
    }

    #[test]
    fn empty_like_preserves_encoding() -> Result<()> {
        assert!(matches!(dense(&[1, 2]).empty_like()?, AlleleContainer::Dense(_)));
        assert!(matches!(sparse(&[1, 2]).empty_like()?, AlleleContainer::Sparse(_)));
        assert!(matches!(labelled(2).empty_like()?, AlleleContainer::Labelled(_)));
        Ok(())
    }

    #[test]
    fn concreteness() {
        assert!(dense(&[1]).is_concrete());
        assert!(sparse(&[1]).is_concrete());
        assert!(!labelled(1).is_concrete());
    }
}
