use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use super::{code::AlleleCode, dense::{check_range, Alleles}, error::ContainerError};
use crate::template::ChromosomeTemplate;

/// Haploid genotypes stored as deviations from an implicit reference
/// sequence. Only non-reference alleles and missing marker indices are kept;
/// the reference itself lives in the chromosome template.
///
/// Useful when manipulating genotypes derived from sequence data, where the
/// overwhelming majority of markers match the reference.
#[derive(Debug, Clone)]
pub struct SparseAlleles<A: AlleleCode = u8> {
    non_ref: BTreeMap<usize, A>,
    missing: BTreeSet<usize>,
    refcode: A,
    size: usize,
    template: Option<Arc<ChromosomeTemplate<A>>>,
}

impl<A: AlleleCode> SparseAlleles<A> {
    /// Encode a raw per-marker array.
    ///
    /// Entries equal to the missing code are recorded as missing; entries
    /// differing from the reference code are recorded as deviations.
    ///
    /// # Arguments
    /// - `data`    : one allele code per marker.
    /// - `refcode` : reference code. Defaults to the code type's standard
    ///               reference when `None`.
    /// - `template`: optional shared marker-map metadata.
    #[must_use]
    pub fn new(data: &[A], refcode: Option<A>, template: Option<Arc<ChromosomeTemplate<A>>>) -> Self {
        let refcode = refcode.unwrap_or_else(A::reference_default);
        let missing_code = A::missing_code();

        let mut non_ref = BTreeMap::new();
        let mut missing = BTreeSet::new();
        for (index, value) in data.iter().enumerate() {
            if *value == missing_code {
                missing.insert(index);
            } else if *value != refcode {
                non_ref.insert(index, value.clone());
            }
        }
        Self { non_ref, missing, refcode, size: data.len(), template }
    }

    /// Number of markers (reference and non-reference alike).
    #[must_use]
    pub fn nmark(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn missing_code(&self) -> A {
        A::missing_code()
    }

    #[must_use]
    pub fn refcode(&self) -> &A {
        &self.refcode
    }

    /// Per-marker mask of missing observations.
    #[must_use]
    pub fn missing(&self) -> Vec<bool> {
        let mut mask = vec![false; self.size];
        for &index in &self.missing {
            mask[index] = true;
        }
        mask
    }

    /// Materialize into a dense container: reference-filled buffer,
    /// deviations written at their indices, missing indices overwritten
    /// with the missing code.
    #[must_use]
    pub fn todense(&self) -> Alleles<A> {
        let mut data = vec![self.refcode.clone(); self.size];
        for (&index, value) in &self.non_ref {
            data[index] = value.clone();
        }
        let missing_code = A::missing_code();
        for &index in &self.missing {
            data[index] = missing_code.clone();
        }
        Alleles::new(data, self.template.clone())
    }

    /// An all-reference container of identical shape. Only defined for
    /// integer allele codes.
    pub fn empty_like(&self) -> Result<Self, ContainerError> {
        if !A::INTEGRAL {
            return Err(ContainerError::NonIntegralCode);
        }
        Ok(Self {
            non_ref: BTreeMap::new(),
            missing: BTreeSet::new(),
            refcode: self.refcode.clone(),
            size: self.size,
            template: self.template.clone(),
        })
    }

    /// Overwrite this container's `[start, stop)` range with the source's
    /// deviations and missing indices over that same range.
    pub fn copy_span(&mut self, source: &Self, start: usize, stop: usize) -> Result<(), ContainerError> {
        check_range(start, stop, self.size)?;
        check_range(start, stop, source.size)?;
        if self.refcode != source.refcode {
            return Err(ContainerError::ReferenceMismatch);
        }

        self.non_ref.retain(|index, _| !(start..stop).contains(index));
        self.missing.retain(|index| !(start..stop).contains(index));
        for (&index, value) in source.non_ref.range(start..stop) {
            self.non_ref.insert(index, value.clone());
        }
        for &index in source.missing.range(start..stop) {
            self.missing.insert(index);
        }
        Ok(())
    }

    /// Elementwise equality against another sparse container.
    ///
    /// All reference positions are equal by construction, so only the
    /// symmetric difference of the two deviation sets can disagree: any
    /// index present on exactly one side, or on both sides with different
    /// values, compares unequal.
    pub fn eq_mask(&self, other: &Self) -> Result<Vec<bool>, ContainerError> {
        if self.size != other.size {
            return Err(ContainerError::SizeMismatch { left: self.size, right: other.size });
        }

        let mut mask = vec![true; self.size];

        // ---- Merge-walk the two ordered deviation maps.
        let mut left = self.non_ref.iter().peekable();
        let mut right = other.non_ref.iter().peekable();
        loop {
            match (left.peek(), right.peek()) {
                (Some(&(&li, lv)), Some(&(&ri, rv))) => match li.cmp(&ri) {
                    Ordering::Less => { mask[li] = false; left.next(); }
                    Ordering::Greater => { mask[ri] = false; right.next(); }
                    Ordering::Equal => {
                        if lv != rv { mask[li] = false; }
                        left.next();
                        right.next();
                    }
                },
                (Some(&(&li, _)), None) => { mask[li] = false; left.next(); }
                (None, Some(&(&ri, _))) => { mask[ri] = false; right.next(); }
                (None, None) => break,
            }
        }
        Ok(mask)
    }

    /// Elementwise equality against a dense container, by materializing.
    pub fn eq_mask_dense(&self, other: &Alleles<A>) -> Result<Vec<bool>, ContainerError> {
        self.todense().eq_mask(other)
    }

    /// Elementwise equality against a single allele code. Requires an
    /// attached template: reference positions are resolved through the
    /// template's reference column.
    pub fn eq_scalar(&self, code: &A) -> Result<Vec<bool>, ContainerError> {
        let template = self.template.as_ref().ok_or(ContainerError::MissingReference)?;
        if template.nmark() != self.size {
            return Err(ContainerError::SizeMismatch { left: self.size, right: template.nmark() });
        }

        let mut mask: Vec<bool> = template.references().map(|reference| reference == code).collect();
        for (&index, value) in &self.non_ref {
            mask[index] = value == code;
        }
        Ok(mask)
    }

    /// Allele codes are categorical: ordering two containers is not
    /// meaningful and always fails.
    pub fn value_cmp(&self, _other: &Self) -> Result<Ordering, ContainerError> {
        Err(ContainerError::NotMeaningful)
    }

    #[must_use]
    pub fn template(&self) -> Option<&Arc<ChromosomeTemplate<A>>> {
        self.template.as_ref()
    }

    /// Number of markers deviating from the reference.
    #[must_use]
    pub fn n_deviations(&self) -> usize {
        self.non_ref.len()
    }
}

/// Container equality ignores the template reference.
impl<A: AlleleCode> PartialEq for SparseAlleles<A> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.refcode == other.refcode
            && self.non_ref == other.non_ref
            && self.missing == other.missing
    }
}

impl<A: AlleleCode> Eq for SparseAlleles<A> {}
