//! Consensus peak synthesis.
//!
//! Turns N peak files into one table of consensus intervals:
//!
//! - [`synthesize`] intersects the inputs at every breakpoint, merges nearby
//!   pieces and scores each interval by its (weighted) support
//! - [`standardize`] collapses the table to one row per interval with a
//!   (weighted) midpoint and an optional fixed width
//! - [`generate_test_samples`] labels positive and negative regions for
//!   evaluating a predicted peak set against a target
//!
//! ```no_run
//! use tfsage_synthesis::{SynthesisOptions, standardize, synthesize};
//!
//! let options = SynthesisOptions {
//!     weights: Some(vec![0.8, 0.2]),
//!     report_original_peaks: true,
//!     ..SynthesisOptions::default()
//! };
//! let table = synthesize(&["rep1.bed", "rep2.bed"], &options).unwrap();
//! let consensus = standardize(&table, true, Some(200)).unwrap();
//! ```

pub mod aggregate;
pub mod config;
pub mod errors;
pub mod intersect;
pub mod samples;
pub mod standardize;
pub mod synthesize;
pub mod table;

// re-exports
pub use aggregate::compute_weighted_sum;
pub use config::{SynthesisConfig, SynthesisOptions};
pub use errors::{Result, SynthesisError};
pub use intersect::{CoverageInterval, Provenance, merge, multi_intersect};
pub use samples::{TestSample, generate_test_samples, write_test_samples};
pub use standardize::{StandardizedRecord, fixed_width, standardize, write_standardized};
pub use synthesize::synthesize;
pub use table::{ConsensusRecord, ConsensusTable};
