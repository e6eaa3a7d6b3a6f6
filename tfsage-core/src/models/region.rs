use std::fmt::{self, Display};

use crate::errors::{RegionSetError, Result};

///
/// Region struct, representation of one interval in a BED-like file.
///
/// Coordinates are 0-based, half-open. Anything after the third column is kept
/// verbatim in `rest`; the BED name, score and strand columns are read from it
/// on demand.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    ///
    /// Create a region, rejecting `start > end`.
    ///
    pub fn new(chr: &str, start: u32, end: u32, rest: Option<String>) -> Result<Self> {
        if start > end {
            return Err(RegionSetError::InvertedRegion {
                chr: chr.to_string(),
                start,
                end,
            });
        }
        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest,
        })
    }

    ///
    /// Get length of the region. A region whose public fields were set to
    /// `start > end` has width zero.
    ///
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Integer midpoint: `start + width / 2`.
    pub fn mid_point(&self) -> u32 {
        self.start + self.width() / 2
    }

    /// Number of bases shared with `other`; zero on different chromosomes.
    pub fn overlap(&self, other: &Region) -> u32 {
        if self.chr != other.chr {
            return 0;
        }
        self.end
            .min(other.end)
            .saturating_sub(self.start.max(other.start))
    }

    fn rest_field(&self, idx: usize) -> Option<&str> {
        self.rest
            .as_deref()
            .and_then(|r| r.split('\t').nth(idx))
            .filter(|s| !s.is_empty())
    }

    /// 4th BED column, e.g. a gene name for TSS loci.
    pub fn annotation(&self) -> Option<&str> {
        self.rest_field(0)
    }

    /// 5th BED column.
    pub fn score(&self) -> Option<f64> {
        self.rest_field(1).and_then(|s| s.parse().ok())
    }

    /// 6th BED column, `+` or `-`.
    pub fn strand(&self) -> Option<char> {
        match self.rest_field(2) {
            Some("+") => Some('+'),
            Some("-") => Some('-'),
            _ => None,
        }
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
