use std::{
    fmt::{self, Display, Formatter},
    path::Path,
    str::FromStr,
};

use log::debug;

mod error;
pub use error::TemplateError;

use crate::container::{AlleleCode, Alleles};

/// Allele code for the more common allele at a diallelic marker.
pub const MAJOR_ALLELE: u8 = 1;
/// Allele code for the less common allele at a diallelic marker.
pub const MINOR_ALLELE: u8 = 2;

/// Which of the two marker maps a position lookup should search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Physical,
    Genetic,
}

impl FromStr for MapType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "genetic" => Ok(Self::Genetic),
            other => Err(TemplateError::InvalidMapType(other.to_owned())),
        }
    }
}

impl Display for MapType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => write!(f, "physical"),
            Self::Genetic => write!(f, "genetic"),
        }
    }
}

/// One diallelic marker of a chromosome map.
///
/// # Fields
/// - `genetic_position` : genetic-map position (cM).
/// - `physical_position`: physical position (bp). Informational only.
/// - `label`            : marker name (e.g. an rsid).
/// - `frequency`        : minor allele frequency. `None` = unset.
/// - `reference`        : reference allele code.
/// - `alternates`       : alternate allele code(s).
#[derive(Debug, Clone, PartialEq)]
pub struct Marker<A: AlleleCode = u8> {
    pub genetic_position: f64,
    pub physical_position: u32,
    pub label: String,
    pub frequency: Option<f64>,
    pub reference: A,
    pub alternates: Vec<A>,
}

/// Static marker-map metadata for one chromosome: frequencies, genetic and
/// physical positions, and reference/alternate codes. Not a chromosome with
/// genotypes — containers reference a template, they never copy it.
///
/// Markers are diallelic and frequencies are given for minor alleles
/// (the major allele frequency is `1 - f_minor`). Built once by appending
/// whole markers — which keeps the four conceptual per-marker columns equal
/// length by construction — then shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeTemplate<A: AlleleCode = u8> {
    label: Option<String>,
    markers: Vec<Marker<A>>,
}

impl<A: AlleleCode> ChromosomeTemplate<A> {
    #[must_use]
    pub fn new(label: Option<String>) -> Self {
        Self { label, markers: Vec::new() }
    }

    /// Build a template from an external genomesimla chromosome-map loader.
    /// The file format belongs to the loader; only the returned template's
    /// shape is this crate's contract.
    pub fn from_genomesimla<F>(path: impl AsRef<Path>, loader: F) -> anyhow::Result<Self>
    where
        F: FnOnce(&Path) -> anyhow::Result<Self>,
    {
        loader(path.as_ref())
    }

    /// Number of markers on the chromosome.
    #[must_use]
    pub fn nmark(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Extent of the chromosome in centimorgans: last minus first genetic
    /// position. 0.0 with fewer than two markers.
    #[must_use]
    pub fn size(&self) -> f64 {
        match (self.markers.first(), self.markers.last()) {
            (Some(first), Some(last)) => last.genetic_position - first.genetic_position,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The label used when written to output. Unnamed chromosomes are "0".
    #[must_use]
    pub fn output_label(&self) -> &str {
        self.label.as_deref().unwrap_or("0")
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker<A>] {
        &self.markers
    }

    #[must_use]
    pub fn marker(&self, index: usize) -> Option<&Marker<A>> {
        self.markers.get(index)
    }

    /// Per-marker minor allele frequencies (`None` = unset).
    pub fn frequencies(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.markers.iter().map(|marker| marker.frequency)
    }

    /// Per-marker reference allele codes.
    pub fn references(&self) -> impl Iterator<Item = &A> + '_ {
        self.markers.iter().map(|marker| &marker.reference)
    }

    /// Append one marker. Set frequencies must be finite probabilities.
    pub fn add_marker(&mut self, marker: Marker<A>) -> Result<(), TemplateError> {
        if let Some(frequency) = marker.frequency {
            Self::check_frequency(&marker.label, frequency)?;
        }
        self.markers.push(marker);
        Ok(())
    }

    /// Manually overwrite one marker's frequency.
    pub fn set_frequency(&mut self, index: usize, frequency: f64) -> Result<(), TemplateError> {
        let nmark = self.nmark();
        let marker = self
            .markers
            .get_mut(index)
            .ok_or(TemplateError::MarkerOutOfBounds { index, nmark })?;
        Self::check_frequency(&marker.label, frequency)?;
        marker.frequency = Some(frequency);
        Ok(())
    }

    fn check_frequency(label: &str, frequency: f64) -> Result<(), TemplateError> {
        if !frequency.is_finite() || !(0.0..=1.0).contains(&frequency) {
            return Err(TemplateError::InvalidFrequency { label: label.to_owned(), frequency });
        }
        Ok(())
    }

    /// A zero-filled dense container of this template's shape.
    #[must_use]
    pub fn empty_chromosome(&self) -> Alleles<A> {
        Alleles::new(vec![A::missing_code(); self.nmark()], None)
    }

    /// Index of the marker closest to `position` on the selected map.
    ///
    /// Binary search for the last marker at or before the query, then
    /// compare against its successor; exact-distance ties resolve to the
    /// lower index.
    pub fn closest_marker(&self, position: f64, map_type: MapType) -> Result<usize, TemplateError> {
        if self.markers.is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }
        let map_position = |marker: &Marker<A>| -> f64 {
            match map_type {
                MapType::Genetic => marker.genetic_position,
                MapType::Physical => f64::from(marker.physical_position),
            }
        };

        // ---- Last index with map position <= query (0 when the query
        //      precedes every marker).
        let left_idx = self.markers.partition_point(|marker| map_position(marker) <= position).saturating_sub(1);

        if left_idx == self.nmark() - 1 {
            return Ok(left_idx);
        }
        let right_idx = left_idx + 1;

        let left_distance = (map_position(&self.markers[left_idx]) - position).abs();
        let right_distance = (map_position(&self.markers[right_idx]) - position).abs();
        if right_distance < left_distance {
            Ok(right_idx)
        } else {
            Ok(left_idx)
        }
    }
}

impl ChromosomeTemplate<u8> {
    /// Draw one random haplotype with every marker simulated independently
    /// (linkage equilibrium).
    ///
    /// Not typically what you want for association work — there is no LD —
    /// but the right seed state when initializing a population pool or a
    /// purely family-based simulation.
    pub fn linkageequilibrium_chromosome(&self, rng: &mut fastrand::Rng) -> Result<Alleles<u8>, TemplateError> {
        let mut data = Vec::with_capacity(self.nmark());
        for marker in &self.markers {
            let frequency = marker
                .frequency
                .ok_or_else(|| TemplateError::UnsetFrequency { label: marker.label.clone() })?;
            data.push(if rng.f64() < frequency { MINOR_ALLELE } else { MAJOR_ALLELE });
        }
        Ok(Alleles::new(data, None))
    }

    /// Draw `nchrom` independent linkage-equilibrium haplotypes.
    pub fn linkageequilibrium_chromosomes(&self, nchrom: usize, rng: &mut fastrand::Rng) -> Result<Vec<Alleles<u8>>, TemplateError> {
        debug!("Drawing {nchrom} linkage-equilibrium chromosomes over {} markers", self.nmark());
        (0..nchrom).map(|_| self.linkageequilibrium_chromosome(rng)).collect()
    }
}

impl<A: AlleleCode> Display for ChromosomeTemplate<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChromosomeTemplate {}: {} markers, {} cM",
            self.label.as_deref().unwrap_or("object"),
            self.nmark(),
            self.size()
        )
    }
}
