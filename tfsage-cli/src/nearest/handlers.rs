use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_core::models::{LabeledMatrix, MetadataTable};
use tfsage_search::{DistanceMetric, ScoringStrategy, compute_distances, find_nearest};

pub fn run_nearest(matches: &ArgMatches) -> Result<()> {
    let embeddings_path = matches
        .get_one::<String>("embeddings")
        .context("--embeddings is required")?;
    let metadata_path = matches
        .get_one::<String>("metadata")
        .context("--metadata is required")?;
    let experiment = matches
        .get_one::<String>("experiment")
        .context("--experiment is required")?;
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;

    let metric: DistanceMetric = matches
        .get_one::<String>("metric")
        .map(String::as_str)
        .unwrap_or("correlation")
        .parse()?;
    let strategy = match matches.get_one::<f64>("sigma-sq") {
        Some(sigma_sq) => ScoringStrategy::Gaussian { sigma_sq: *sigma_sq },
        None => ScoringStrategy::EstimateFromData,
    };

    let embeddings = LabeledMatrix::from_tsv(embeddings_path)
        .with_context(|| format!("Failed to read embeddings: {}", embeddings_path))?;
    let metadata = MetadataTable::from_tsv(metadata_path)
        .with_context(|| format!("Failed to read metadata: {}", metadata_path))?;

    let distances = compute_distances(&embeddings, metric)?;
    let nearest = find_nearest(experiment, &distances, &metadata, strategy)?;

    nearest
        .write_tsv(output)
        .with_context(|| format!("Failed to write {}", output))?;

    Ok(())
}
