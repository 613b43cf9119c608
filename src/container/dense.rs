use std::{cmp::Ordering, ops::Index, sync::Arc};

use itertools::izip;

use super::{code::AlleleCode, error::ContainerError};
use crate::template::ChromosomeTemplate;

/// Dense haploid genotypes: one allele code per marker, indexed 0..N-1.
///
/// # Fields
/// - `data`    : allele codes, one per marker.
/// - `template`: optional shared marker-map metadata. Never copied; the
///               template is built once, then read-shared by every container
///               of the chromosome.
#[derive(Debug, Clone)]
pub struct Alleles<A: AlleleCode = u8> {
    data: Vec<A>,
    template: Option<Arc<ChromosomeTemplate<A>>>,
}

impl<A: AlleleCode> Alleles<A> {
    #[must_use]
    pub fn new(data: Vec<A>, template: Option<Arc<ChromosomeTemplate<A>>>) -> Self {
        Self { data, template }
    }

    /// Number of markers represented by this container.
    #[must_use]
    pub fn nmark(&self) -> usize {
        self.data.len()
    }

    /// The code standing for a missing observation (0 for integer codes,
    /// empty string otherwise).
    #[must_use]
    pub fn missing_code(&self) -> A {
        A::missing_code()
    }

    /// Per-marker mask of missing observations.
    #[must_use]
    pub fn missing(&self) -> Vec<bool> {
        let missing = A::missing_code();
        self.data.iter().map(|code| *code == missing).collect()
    }

    /// A zero-filled container of identical shape, referencing the same
    /// template.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self {
            data: vec![A::missing_code(); self.nmark()],
            template: self.template.clone(),
        }
    }

    /// Overwrite this container's `[start, stop)` range with the source's
    /// values over that same range.
    pub fn copy_span(&mut self, source: &Self, start: usize, stop: usize) -> Result<(), ContainerError> {
        check_range(start, stop, self.nmark())?;
        check_range(start, stop, source.nmark())?;
        self.data[start..stop].clone_from_slice(&source.data[start..stop]);
        Ok(())
    }

    /// Elementwise equality against another dense container.
    pub fn eq_mask(&self, other: &Self) -> Result<Vec<bool>, ContainerError> {
        if self.nmark() != other.nmark() {
            return Err(ContainerError::SizeMismatch { left: self.nmark(), right: other.nmark() });
        }
        Ok(izip!(&self.data, &other.data).map(|(a, b)| a == b).collect())
    }

    /// Elementwise equality against a single allele code.
    #[must_use]
    pub fn eq_scalar(&self, code: &A) -> Vec<bool> {
        self.data.iter().map(|value| value == code).collect()
    }

    /// Allele codes are categorical: ordering two containers is not
    /// meaningful and always fails.
    pub fn value_cmp(&self, _other: &Self) -> Result<Ordering, ContainerError> {
        Err(ContainerError::NotMeaningful)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.data.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    #[must_use]
    pub fn template(&self) -> Option<&Arc<ChromosomeTemplate<A>>> {
        self.template.as_ref()
    }
}

/// Container equality ignores the template reference: two haplotypes are
/// equal when their allele codes match at every marker.
impl<A: AlleleCode> PartialEq for Alleles<A> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<A: AlleleCode> Eq for Alleles<A> {}

impl<A: AlleleCode> Index<usize> for Alleles<A> {
    type Output = A;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

pub(super) fn check_range(start: usize, stop: usize, nmark: usize) -> Result<(), ContainerError> {
    if start > stop || stop > nmark {
        return Err(ContainerError::SpanOutOfBounds { start, stop, nmark });
    }
    Ok(())
}
