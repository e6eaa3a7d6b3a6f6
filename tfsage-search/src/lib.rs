//! Similarity search over sample embeddings.
//!
//! [`compute_distances`] turns an embedding matrix (samples × dimensions)
//! into a sample × sample distance matrix; [`find_nearest`] ranks every
//! sample against one experiment and scores the ranking with a
//! [`ScoringStrategy`].

pub mod distance;
pub mod errors;
pub mod nearest;
pub mod scoring;

// re-exports
pub use distance::{DistanceMetric, compute_distances};
pub use errors::{Result, SearchError};
pub use nearest::{NearestTable, Neighbour, find_nearest};
pub use scoring::{Scorer, ScoringStrategy, estimate_sigma_sq};
