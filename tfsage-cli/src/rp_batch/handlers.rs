use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_rp::compute_batch;

use crate::rp::handlers::{load_loci, rp_config_from_matches};

pub fn run_rp_batch(matches: &ArgMatches) -> Result<()> {
    let beds: Vec<&String> = matches
        .get_many::<String>("beds")
        .context("--beds is required")?
        .collect();
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;

    let mut config = rp_config_from_matches(matches)?;
    if let Some(workers) = matches.get_one::<usize>("workers") {
        config.max_workers = Some(*workers);
    }
    if matches.get_flag("no-progress") {
        config.progress = false;
    }

    let loci = Arc::new(load_loci(&config)?);
    let matrix = compute_batch(&beds, loci, &config)?;

    matrix
        .write_tsv(output)
        .with_context(|| format!("Failed to write RP matrix to {}", output))?;
    log::info!(
        "{} genes x {} samples written to {}",
        matrix.n_rows(),
        matrix.n_cols(),
        output
    );

    Ok(())
}
