//! Sample embeddings of an RP matrix.
//!
//! Batch integration is delegated to an R script (Seurat). This crate
//! validates the request, exchanges parquet files with the script through a
//! scratch directory and reads the embedding back as a [`LabeledMatrix`].
//!
//! [`LabeledMatrix`]: tfsage_core::models::LabeledMatrix

pub mod errors;
pub mod exchange;
pub mod method;
pub mod script;

// re-exports
pub use errors::{EmbeddingError, Result};
pub use method::{EmbeddingMethod, parse_methods};
pub use script::{EmbeddingScript, generate_embeddings, run_script};
