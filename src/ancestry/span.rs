use std::fmt::{self, Display, Formatter};

use crate::genotypes::IndividualId;

/// One of the two parental copies an individual carries per chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Haplotype {
    Zero = 0,
    One = 1,
}

impl Haplotype {
    pub const BOTH: [Haplotype; 2] = [Haplotype::Zero, Haplotype::One];

    /// 0-based index of this haplotype within a diploid pair.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The other haplotype of the pair.
    #[must_use]
    pub fn sibling(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

impl Display for Haplotype {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A contiguous run of markers inherited from a single ancestral haplotype.
///
/// # Fields
/// - `ancestor`  : identifier of the individual this run was copied from.
/// - `chromosome`: 0-based chromosome index within the ancestor's genotypes.
/// - `haplotype` : which of the ancestor's two copies the run came from.
/// - `start`     : 0-based index of the first marker of the run.
/// - `stop`      : marker index one past the last copied marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritanceSpan {
    pub ancestor: IndividualId,
    pub chromosome: usize,
    pub haplotype: Haplotype,
    pub start: usize,
    pub stop: usize,
}

impl InheritanceSpan {
    #[must_use]
    pub fn new(ancestor: IndividualId, chromosome: usize, haplotype: Haplotype, start: usize, stop: usize) -> Self {
        Self { ancestor, chromosome, haplotype, start, stop }
    }

    /// Whether `index` falls within this span.
    ///
    /// Containment is inclusive at BOTH ends: two correctly tiled adjacent
    /// spans both claim the marker at their shared boundary. The span
    /// clipping logic of `LabelledAlleles::copy_span` is written against
    /// exactly this predicate; do not tighten it.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.stop
    }

    /// The `(start, stop)` marker interval of this span.
    #[must_use]
    pub fn interval(&self) -> (usize, usize) {
        (self.start, self.stop)
    }

    /// A span attributed to the same ancestral haplotype, clipped to new
    /// bounds.
    #[must_use]
    pub fn with_bounds(&self, start: usize, stop: usize) -> Self {
        Self { start, stop, ..*self }
    }

    /// The symbolic stand-in allele for this span: identifies the ancestral
    /// haplotype without resolving a concrete code.
    #[must_use]
    pub fn ancestral_allele(&self) -> AncestralAllele {
        AncestralAllele { ancestor: self.ancestor, haplotype: self.haplotype }
    }
}

impl Display for InheritanceSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} [{}, {})", self.ancestor, self.chromosome, self.haplotype, self.start, self.stop)
    }
}

/// Symbolic placeholder for an allele whose concrete value is deferred.
///
/// Equality compares only the (ancestor, haplotype) pair — enough to answer
/// same-or-different-origin questions without delabeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AncestralAllele {
    pub ancestor: IndividualId,
    pub haplotype: Haplotype,
}

impl Display for AncestralAllele {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ancestor, self.haplotype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, stop: usize) -> InheritanceSpan {
        InheritanceSpan::new(IndividualId(7), 0, Haplotype::Zero, start, stop)
    }

    #[test]
    fn containment_is_inclusive_at_both_ends() {
        let span = span(5, 10);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(7));
        assert!(span.contains(10));
        assert!(!span.contains(11));
    }

    #[test]
    fn adjacent_spans_share_their_boundary() {
        let left = span(0, 5);
        let right = span(5, 10);
        assert!(left.contains(5));
        assert!(right.contains(5));
    }

    #[test]
    fn clipping_preserves_attribution() {
        let original = span(0, 10);
        let clipped = original.with_bounds(3, 7);
        assert_eq!(clipped.interval(), (3, 7));
        assert_eq!(clipped.ancestral_allele(), original.ancestral_allele());
    }

    #[test]
    fn ancestral_allele_ignores_position() {
        assert_eq!(span(0, 5).ancestral_allele(), span(5, 10).ancestral_allele());

        let other_hap = InheritanceSpan::new(IndividualId(7), 0, Haplotype::One, 0, 5);
        assert_ne!(span(0, 5).ancestral_allele(), other_hap.ancestral_allele());

        let other_ind = InheritanceSpan::new(IndividualId(8), 0, Haplotype::Zero, 0, 5);
        assert_ne!(span(0, 5).ancestral_allele(), other_ind.ancestral_allele());
    }

    #[test]
    fn haplotype_indices() {
        assert_eq!(Haplotype::Zero.index(), 0);
        assert_eq!(Haplotype::One.index(), 1);
        assert_eq!(Haplotype::Zero.sibling(), Haplotype::One);
        assert_eq!(format!("{}", Haplotype::One), "1");
    }
}
