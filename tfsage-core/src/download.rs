//! Fetch peak files for public experiments (ENCODE, ChIP-Atlas).
//!
//! URL resolution is always available; the network fetch needs the `http`
//! feature.

#[cfg(feature = "http")]
use std::io::{Read, Write};
#[cfg(feature = "http")]
use std::path::Path;

use crate::errors::{RegionSetError, Result};
#[cfg(feature = "http")]
use crate::models::RegionSet;

pub const DEFAULT_GENOME: &str = "hg38";

///
/// Resolve the download URL of an experiment.
///
/// `ENC*` identifiers are ENCODE file accessions. Anything else is treated as
/// a ChIP-Atlas id of the form `SRX000000.05`, where the second field selects
/// the significance threshold directory.
///
pub fn experiment_url(experiment_id: &str, genome: &str) -> Result<String> {
    if experiment_id.starts_with("ENC") {
        return Ok(format!(
            "https://www.encodeproject.org/files/{id}/@@download/{id}.bed.gz",
            id = experiment_id
        ));
    }

    let threshold = experiment_id
        .split('.')
        .nth(1)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RegionSetError::InvalidExperimentId(experiment_id.to_string()))?;

    Ok(format!(
        "https://chip-atlas.dbcls.jp/data/{}/eachData/bed{}/{}.bed",
        genome, threshold, experiment_id
    ))
}

///
/// Download an experiment, sort it and save it as a bed file.
///
/// # Arguments
/// - experiment_id: ENCODE accession or ChIP-Atlas id
/// - output_file: where the sorted bed file goes
/// - genome: genome build, only used for ChIP-Atlas
#[cfg(feature = "http")]
pub fn download_experiment<P: AsRef<Path>>(
    experiment_id: &str,
    output_file: P,
    genome: &str,
) -> Result<()> {
    let url = experiment_url(experiment_id, genome)?;
    log::info!("Downloading {} from {}", experiment_id, url);

    let response = ureq::get(&url)
        .call()
        .map_err(|e| RegionSetError::DownloadError(format!("{}: {}", url, e)))?;

    let mut bytes = Vec::new();
    response
        .into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| RegionSetError::DownloadError(format!("{}: {}", url, e)))?;

    // staged on disk so the regular reader handles gzip detection
    let suffix = match url.ends_with(".gz") {
        true => ".bed.gz",
        false => ".bed",
    };
    let mut staged = tempfile::Builder::new().suffix(suffix).tempfile()?;
    staged.write_all(&bytes)?;
    staged.flush()?;

    let regions = RegionSet::try_from(staged.path())?.sorted();
    regions.write_bed(output_file.as_ref())?;

    log::info!(
        "Saved {} regions to {}",
        regions.len(),
        output_file.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_encode_url() {
        assert_eq!(
            experiment_url("ENCFF123ABC", DEFAULT_GENOME).unwrap(),
            "https://www.encodeproject.org/files/ENCFF123ABC/@@download/ENCFF123ABC.bed.gz"
        );
    }

    #[rstest]
    fn test_chip_atlas_url() {
        assert_eq!(
            experiment_url("SRX018625.05", "mm10").unwrap(),
            "https://chip-atlas.dbcls.jp/data/mm10/eachData/bed05/SRX018625.05.bed"
        );
    }

    #[rstest]
    fn test_chip_atlas_without_threshold_is_error() {
        assert!(matches!(
            experiment_url("SRX018625", DEFAULT_GENOME),
            Err(RegionSetError::InvalidExperimentId(_))
        ));
    }
}
