//! Core models for tfsage.
//!
//! Genomes (chromosome lengths), genomic regions and region sets read from
//! BED-like files, plus the small labeled-matrix and metadata tables passed
//! between the scoring, search and embedding crates.
//!
//! ```no_run
//! use tfsage_core::models::{Genome, RegionSet};
//!
//! let genome = Genome::try_from(std::path::Path::new("hg38.len")).unwrap();
//! let peaks = RegionSet::try_from("peaks.bed").unwrap();
//! genome.check_region_set(&peaks, true).unwrap();
//! ```

pub mod download;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{RegionSetError, Result};
