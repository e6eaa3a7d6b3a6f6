use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_synthesis::{generate_test_samples, write_test_samples};

pub fn run_test_samples(matches: &ArgMatches) -> Result<()> {
    let query = matches
        .get_one::<String>("query")
        .context("--query is required")?;
    let target = matches
        .get_one::<String>("target")
        .context("--target is required")?;
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;
    let width = match matches.get_flag("keep-width") {
        true => None,
        false => matches.get_one::<u32>("width").copied(),
    };

    let samples = generate_test_samples(query, target, width)?;
    write_test_samples(&samples, output).with_context(|| format!("Failed to write {}", output))?;

    let positives = samples.iter().filter(|s| s.positive).count();
    log::info!(
        "{} samples ({} positive) written to {}",
        samples.len(),
        positives,
        output
    );

    Ok(())
}
