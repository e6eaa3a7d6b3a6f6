use thiserror::Error;

use tfsage_core::RegionSetError;

#[derive(Error, Debug)]
pub enum RpError {
    #[error("Decay must be a positive, finite number of base pairs, got {0}")]
    InvalidDecay(f64),

    #[error("Unsupported genome: {0}. Supported genomes are: hg38, mm10")]
    UnsupportedGenome(String),

    #[error("No assets directory given and {0} is not set")]
    MissingAssetsDir(&'static str),

    #[error("Gene locus without a gene name in the 4th column: {0}")]
    MissingGeneName(String),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Task {index} ({label}) failed: {source}")]
    TaskFailed {
        index: usize,
        label: String,
        #[source]
        source: Box<RpError>,
    },

    #[error("No result was recorded for task {0}")]
    MissingResult(usize),

    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    RegionSet(#[from] RegionSetError),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RpError>;
