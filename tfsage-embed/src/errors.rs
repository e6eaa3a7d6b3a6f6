use std::path::PathBuf;

use thiserror::Error;

use tfsage_core::RegionSetError;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error(
        "Invalid method: {0}. Valid methods are: CCAIntegration, HarmonyIntegration, JointPCAIntegration, RPCAIntegration, FastMNNIntegration, none"
    )]
    InvalidMethod(String),
    #[error("At least one embedding method is required")]
    NoMethods,
    #[error("Align key {0} is not a metadata column")]
    UnknownAlignKey(String),
    #[error("Embedding script not found: {0}")]
    ScriptNotFound(PathBuf),
    #[error("Embedding script exited with {status}: {stderr}")]
    ScriptFailed { status: String, stderr: String },
    #[error("Embedding script produced no output at {0}")]
    MissingOutput(PathBuf),
    #[error("No __index_level_0__ column in {0}")]
    MissingIndexColumn(PathBuf),
    #[error("Unreadable embedding output: {0}")]
    InvalidOutput(String),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    RegionSet(#[from] RegionSetError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
