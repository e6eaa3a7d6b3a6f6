use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region: {0}")]
    RegionParseError(String),

    #[error("Invalid region {chr}:{start}-{end}: start is greater than end")]
    InvertedRegion { chr: String, start: u32, end: u32 },

    #[error("Chromosome not found in genome: {0}")]
    UnknownChromosome(String),

    #[error("Region {chr}:{start}-{end} exceeds chromosome length {length}")]
    RegionOutOfBounds {
        chr: String,
        start: u32,
        end: u32,
        length: u32,
    },

    #[error("Error parsing chrom sizes line: {0}")]
    ChromSizesParseError(String),

    #[error("Error parsing matrix: {0}")]
    MatrixParseError(String),

    #[error("Invalid experiment identifier: {0}")]
    InvalidExperimentId(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RegionSetError>;
