//! Regulatory potential (RP) scoring.
//!
//! Links peaks to genes: each peak within the decay window of a gene's TSS
//! adds `2^(-distance / decay)` to that gene's score. [`compute`] scores one
//! peak file; [`compute_batch`] scores many in parallel into a gene × sample
//! matrix whose columns always follow the input order.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tfsage_rp::{GeneLocusSet, GenomeBuild, RpConfig, compute_batch};
//!
//! let loci = GeneLocusSet::load(GenomeBuild::Hg38, "assets".as_ref()).unwrap();
//! let files = vec!["a.bed", "b.bed"];
//! let matrix = compute_batch(&files, Arc::new(loci), &RpConfig::default()).unwrap();
//! matrix.write_tsv("rp_matrix.tsv.gz").unwrap();
//! ```

pub mod batch;
pub mod compute;
pub mod config;
pub mod consts;
pub mod errors;
pub mod kernel;
pub mod loci;
pub mod pool;

// re-exports
pub use batch::{RpContext, RpMatrix, compute_batch};
pub use compute::{RpVector, compute};
pub use config::RpConfig;
pub use errors::{Result, RpError};
pub use kernel::{DecayKernel, potential};
pub use loci::{GeneLocusSet, GenomeBuild};
