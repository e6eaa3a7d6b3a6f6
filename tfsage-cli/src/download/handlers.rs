use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_core::download::{DEFAULT_GENOME, download_experiment};

pub fn run_download(matches: &ArgMatches) -> Result<()> {
    let id = matches.get_one::<String>("id").context("--id is required")?;
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;
    let genome = matches
        .get_one::<String>("genome")
        .map(String::as_str)
        .unwrap_or(DEFAULT_GENOME);

    download_experiment(id, output, genome)
        .with_context(|| format!("Failed to download {}", id))?;

    Ok(())
}
