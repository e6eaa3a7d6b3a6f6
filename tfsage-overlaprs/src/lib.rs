//! Interval overlap queries for tfsage.
//!
//! All overlap computation in the workspace goes through this crate: the RP
//! kernel uses it to find peaks within the decay window of a locus, and
//! interval synthesis uses it for subtraction and for attaching original
//! peaks to consensus intervals.
//!
//! ```rust
//! use tfsage_overlaprs::{Lapper, Overlapper, Interval};
//!
//! let intervals = vec![
//!     Interval { start: 100u32, end: 200, val: "gene1" },
//!     Interval { start: 150, end: 300, val: "gene2" },
//!     Interval { start: 400, end: 500, val: "gene3" },
//! ];
//! let lapper = Lapper::build(intervals);
//! assert_eq!(lapper.find(180, 250).len(), 2);
//! ```

/// Sorted-list overlap index. See [`Lapper`].
pub mod lapper;

/// Genome-wide indexing, one [`Lapper`] per chromosome.
pub mod multi_chrom_overlapper;

/// Core traits for overlap operations. See [`Overlapper`].
pub mod traits;

// re-exports
pub use self::lapper::Lapper;
pub use self::multi_chrom_overlapper::{IntoMultiChromOverlapper, MultiChromOverlapper};
pub use self::traits::{Interval, Overlapper};
