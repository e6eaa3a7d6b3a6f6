use thiserror::Error;

use tfsage_core::RegionSetError;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("At least one interval file is required")]
    NoInputs,
    #[error("Expected {expected} weights, one per input file, got {found}")]
    WeightLengthMismatch { expected: usize, found: usize },
    #[error("Weighted standardization needs original-peak provenance")]
    MissingProvenance,
    #[error("Weighted standardization needs a weight vector")]
    MissingWeights,
    #[error("Fixed width must be greater than zero")]
    InvalidWidth,
    #[error(transparent)]
    RegionSet(#[from] RegionSetError),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SynthesisError>;
