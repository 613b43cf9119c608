use thiserror::Error;

use crate::ancestry::AncestryError;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Trying to compare different-sized chromosomes ({left} and {right} markers)")]
    SizeMismatch { left: usize, right: usize },

    #[error("Uncomparable types: {0} and {1}")]
    UncomparableTypes(&'static str, &'static str),

    #[error("Value comparisons not meaningful for genotypes")]
    NotMeaningful,

    #[error("Operation requires integer allele codes")]
    NonIntegralCode,

    #[error("Trying to compare values to sparse without a reference template")]
    MissingReference,

    #[error("Cannot copy between sparse containers with different reference codes")]
    ReferenceMismatch,

    #[error("Symbolic genotypes must be delabeled first")]
    SymbolicGenotype,

    #[error("Copy range [{start}, {stop}) out of bounds for {nmark} markers")]
    SpanOutOfBounds { start: usize, stop: usize, nmark: usize },

    #[error(transparent)]
    Ancestry(#[from] Box<AncestryError>),
}
