use thiserror::Error;

use crate::container::ContainerError;
use crate::genotypes::{GenotypeError, IndividualId};

#[derive(Error, Debug)]
pub enum IbsError {
    #[error("Individual {individual} still carries symbolic genotypes on chromosome {chromosome}")]
    SymbolicGenotypes { individual: IndividualId, chromosome: usize },

    #[error(transparent)]
    Genotype(#[from] GenotypeError),

    #[error(transparent)]
    Container(#[from] ContainerError),
}
