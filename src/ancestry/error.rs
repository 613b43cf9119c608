use thiserror::Error;

use super::span::Haplotype;
use crate::container::ContainerError;
use crate::genotypes::{GenotypeError, IndividualId};

#[derive(Error, Debug)]
pub enum AncestryError {
    #[error("Span [{start}, {stop}) would overwrite an already-tiled region")]
    SpanOrderViolation { start: usize, stop: usize },

    #[error("First span must start at the chromosome origin (got start = {0})")]
    SpanNotAtOrigin(usize),

    #[error("Span starting at {start} is not contiguous with the previous stop {expected}")]
    SpansNotContiguous { start: usize, expected: usize },

    #[error("Unforeseen combination of spans: [{span_start}, {span_stop}) against copy range [{copy_start}, {copy_stop})")]
    UnforeseenSpans {
        span_start: usize,
        span_stop: usize,
        copy_start: usize,
        copy_stop: usize,
    },

    #[error("Ancestral chromosome {ancestor}:{chromosome}:{haplotype} has not been delabeled")]
    UnresolvedAncestry {
        ancestor: IndividualId,
        chromosome: usize,
        haplotype: Haplotype,
    },

    #[error("Cannot delabel a container with no spans")]
    EmptySpans,

    #[error(transparent)]
    Genotype(#[from] GenotypeError),

    #[error(transparent)]
    Container(#[from] ContainerError),
}
