use thiserror::Error;

use super::IndividualId;

#[derive(Error, Debug)]
pub enum GenotypeError {
    #[error("Unknown individual: {0}")]
    UnknownIndividual(IndividualId),

    #[error("Individual {individual} carries no chromosome with index {chromosome}")]
    UnknownChromosome { individual: IndividualId, chromosome: usize },
}
