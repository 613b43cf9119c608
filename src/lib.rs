pub mod template;
pub use template::{ChromosomeTemplate, MapType, Marker};

pub mod container;
pub use container::{AlleleCode, AlleleContainer, Alleles, SparseAlleles};

pub mod ancestry;
pub use ancestry::{AncestralAllele, Haplotype, InheritanceSpan, LabelledAlleles};

pub mod genotypes;
pub use genotypes::{DiploidGenotypes, GenotypeStore, IndividualId};

pub mod ibs;
pub use ibs::{chromwide_ibs, get_ibs_states, DEFAULT_MISSING_CODE};
