pub mod genome;
pub mod interval;
pub mod matrix;
pub mod metadata;
pub mod region;
pub mod region_set;

// re-export for cleaner imports
pub use self::genome::Genome;
pub use self::interval::Interval;
pub use self::matrix::LabeledMatrix;
pub use self::metadata::MetadataTable;
pub use self::region::Region;
pub use self::region_set::RegionSet;
