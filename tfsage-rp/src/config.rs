use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DECAY, DEFAULT_GENOME};
use crate::errors::{Result, RpError};

/// Settings for RP scoring, readable from a TOML file.
///
/// ```toml
/// genome = "mm10"
/// decay = 5000.0
/// max_workers = 8
/// strict_bounds = false
/// assets_dir = "/data/tfsage/assets"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RpConfig {
    pub genome: String,
    pub decay: f64,
    pub max_workers: Option<usize>,
    pub strict_bounds: bool,
    pub progress: bool,
    pub assets_dir: Option<PathBuf>,
}

impl Default for RpConfig {
    fn default() -> Self {
        RpConfig {
            genome: DEFAULT_GENOME.to_string(),
            decay: DEFAULT_DECAY,
            max_workers: None,
            strict_bounds: false,
            progress: true,
            assets_dir: None,
        }
    }
}

impl TryFrom<&Path> for RpConfig {
    type Error = RpError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rp.toml");
        std::fs::write(&path, "decay = 5000.0\nmax_workers = 2\n").unwrap();

        let config = RpConfig::try_from(path.as_path()).unwrap();
        assert_eq!(
            config,
            RpConfig {
                decay: 5000.0,
                max_workers: Some(2),
                ..RpConfig::default()
            }
        );
    }

    #[rstest]
    fn test_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rp.toml");
        std::fs::write(&path, "decay = \"fast\"\n").unwrap();
        assert!(matches!(
            RpConfig::try_from(path.as_path()),
            Err(RpError::Toml(_))
        ));
    }
}
