use thiserror::Error;

use tfsage_core::RegionSetError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unknown distance metric: {0}. Valid metrics are: correlation, cosine, euclidean")]
    UnknownMetric(String),
    #[error("Experiment {0} is not in the distance matrix")]
    UnknownExperiment(String),
    #[error("Distance matrix must be square with matching labels, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Scoring variance must be positive and finite, got {0}")]
    InvalidSigma(f64),
    #[error(transparent)]
    RegionSet(#[from] RegionSetError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
