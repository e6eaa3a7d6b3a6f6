use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SynthesisError};

/// How input files are combined into a consensus table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SynthesisOptions {
    /// Largest gap, in bp, still merged into one interval.
    pub merge_distance: u32,
    /// One weight per input file; `None` weighs all inputs equally.
    pub weights: Option<Vec<f64>>,
    /// Keep one row per contributing original peak.
    pub report_original_peaks: bool,
}

///
/// Synthesis plus standardization settings, as stored in a TOML file:
///
/// ```toml
/// merge_distance = 50
/// weights = [0.9, 0.4, 0.7]
/// report_original_peaks = true
/// weighted = true
/// width = 200
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SynthesisConfig {
    #[serde(flatten)]
    pub options: SynthesisOptions,
    pub weighted: bool,
    pub width: Option<u32>,
}

impl TryFrom<&Path> for SynthesisConfig {
    type Error = SynthesisError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
