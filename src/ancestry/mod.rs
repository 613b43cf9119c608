use log::trace;

mod span;
pub use span::{AncestralAllele, Haplotype, InheritanceSpan};

mod error;
pub use error::AncestryError;

use crate::container::{AlleleCode, AlleleContainer};
use crate::genotypes::{GenotypeStore, IndividualId};

/// Haploid genotypes represented symbolically: instead of allele codes, an
/// ordered sequence of [`InheritanceSpan`]s recording whose haplotype each
/// marker range was inherited from.
///
/// The spans must exactly tile `[0, nmark)` — no gap, no overlap, strictly
/// increasing — and [`LabelledAlleles::add_span`] enforces that tiling
/// incrementally. Concrete allele values are only materialized on
/// [`LabelledAlleles::delabel`], by walking ancestry through a
/// [`GenotypeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledAlleles {
    spans: Vec<InheritanceSpan>,
    nmark: usize,
}

impl LabelledAlleles {
    /// An empty symbolic container covering no markers yet.
    #[must_use]
    pub fn new(nmark: usize) -> Self {
        Self { spans: Vec::new(), nmark }
    }

    /// Seed state for a founder: a single span covering `[0, nmark)`,
    /// attributed entirely to one ancestral haplotype.
    #[must_use]
    pub fn founder_chromosome(ancestor: IndividualId, chromosome: usize, haplotype: Haplotype, nmark: usize) -> Self {
        let span = InheritanceSpan::new(ancestor, chromosome, haplotype, 0, nmark);
        Self { spans: vec![span], nmark }
    }

    #[must_use]
    pub fn nmark(&self) -> usize {
        self.nmark
    }

    #[must_use]
    pub fn spans(&self) -> &[InheritanceSpan] {
        &self.spans
    }

    /// An empty symbolic container of identical shape.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self::new(self.nmark)
    }

    /// The symbolic allele covering `index`, if any span claims it. At a
    /// tiled boundary the earlier span answers first.
    #[must_use]
    pub fn ancestral_allele_at(&self, index: usize) -> Option<AncestralAllele> {
        self.spans.iter().find(|span| span.contains(index)).map(InheritanceSpan::ancestral_allele)
    }

    /// Append a span, enforcing the tiling invariant:
    /// - a span may never stop before an already-appended span stops;
    /// - the first span must start at the chromosome origin;
    /// - every later span must start exactly where the previous one stopped.
    pub fn add_span(&mut self, new_span: InheritanceSpan) -> Result<(), AncestryError> {
        if self.spans.iter().any(|span| new_span.stop < span.stop) {
            return Err(AncestryError::SpanOrderViolation { start: new_span.start, stop: new_span.stop });
        }
        match self.spans.last() {
            None if new_span.start > 0 => {
                return Err(AncestryError::SpanNotAtOrigin(new_span.start))
            }
            Some(last) if new_span.start != last.stop => {
                return Err(AncestryError::SpansNotContiguous { start: new_span.start, expected: last.stop })
            }
            _ => {}
        }
        self.spans.push(new_span);
        Ok(())
    }

    /// The recombination primitive: append the portion of the source's
    /// spans overlapping `[copy_start, copy_stop)`, clipped to that range.
    ///
    /// Each source span is classified against the requested range, in
    /// order. A span containing `copy_stop` closes the requested range:
    /// scanning stops there and any later source span is never examined.
    pub fn copy_span(&mut self, source: &Self, copy_start: usize, copy_stop: usize) -> Result<(), AncestryError> {
        for span in source.spans() {
            if copy_start > span.stop || copy_stop < span.start {
                // Ours           [-------------]
                // Source   [---]      OR          [-----]
                continue;
            } else if copy_start == span.start && copy_stop == span.stop {
                // Ours           [----------]
                // Source         [----------]
                self.add_span(span.with_bounds(copy_start, copy_stop))?;
            } else if span.contains(copy_start) && span.contains(copy_stop) {
                // Ours             [----------]
                // Source        [-----------------]
                self.add_span(span.with_bounds(copy_start, copy_stop))?;
            } else if span.contains(copy_start) {
                // Ours             [----------------]
                // Source        [--------]
                self.add_span(span.with_bounds(copy_start, span.stop))?;
            } else if span.contains(copy_stop) {
                // Ours          [-----------------]
                // Source                    [-----------]
                self.add_span(span.with_bounds(span.start, copy_stop))?;
                return Ok(());
            } else if span.start > copy_start && span.stop < copy_stop {
                // Ours          [------------------------]
                // Source              [-------------]
                self.add_span(*span)?;
            } else {
                return Err(AncestryError::UnforeseenSpans {
                    span_start: span.start,
                    span_stop: span.stop,
                    copy_start,
                    copy_stop,
                });
            }
        }
        Ok(())
    }

    /// Resolve this symbolic container into a concrete one.
    ///
    /// Every span's ancestral chromosome must already be concrete within
    /// the store; ancestry is therefore resolved founder-first across the
    /// pedigree, never recursively at read time. The result takes the shape
    /// of the first span's ancestral chromosome and is filled span by span.
    pub fn delabel<A: AlleleCode>(&self, store: &GenotypeStore<A>) -> Result<AlleleContainer<A>, AncestryError> {
        // ---- Check that every ancestral chromosome is already delabeled.
        for span in &self.spans {
            let ancestral = store.haplotype(span.ancestor, span.chromosome, span.haplotype)?;
            if !ancestral.is_concrete() {
                return Err(AncestryError::UnresolvedAncestry {
                    ancestor: span.ancestor,
                    chromosome: span.chromosome,
                    haplotype: span.haplotype,
                });
            }
        }

        // ---- Fill an empty shell of the first ancestral chromosome's shape.
        let first = self.spans.first().ok_or(AncestryError::EmptySpans)?;
        let mut resolved = store.haplotype(first.ancestor, first.chromosome, first.haplotype)?.empty_like()?;
        for span in &self.spans {
            let ancestral = store.haplotype(span.ancestor, span.chromosome, span.haplotype)?;
            resolved.copy_span(ancestral, span.start, span.stop)?;
            trace!("delabeled span {span}");
        }
        Ok(resolved)
    }
}
