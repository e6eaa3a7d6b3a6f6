use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_synthesis::{SynthesisConfig, standardize, synthesize, write_standardized};

fn synthesis_config_from_matches(matches: &ArgMatches) -> Result<SynthesisConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SynthesisConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => SynthesisConfig::default(),
    };

    if let Some(weights) = matches.get_many::<f64>("weights") {
        config.options.weights = Some(weights.copied().collect());
    }
    if let Some(distance) = matches.get_one::<u32>("merge-distance") {
        config.options.merge_distance = *distance;
    }
    if matches.get_flag("report-original-peaks") {
        config.options.report_original_peaks = true;
    }
    if matches.get_flag("weighted") {
        config.weighted = true;
    }
    if let Some(width) = matches.get_one::<u32>("width") {
        config.width = Some(*width);
    }
    if config.weighted {
        config.options.report_original_peaks = true;
    }

    Ok(config)
}

pub fn run_synthesize(matches: &ArgMatches) -> Result<()> {
    let beds: Vec<&String> = matches
        .get_many::<String>("beds")
        .context("--beds is required")?
        .collect();
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;
    let config = synthesis_config_from_matches(matches)?;

    let table = synthesize(&beds, &config.options)?;

    if config.weighted || config.width.is_some() {
        let records = standardize(&table, config.weighted, config.width)?;
        write_standardized(&records, output)
            .with_context(|| format!("Failed to write {}", output))?;
        log::info!("{} standardized intervals written to {}", records.len(), output);
    } else {
        table
            .write_tsv(output)
            .with_context(|| format!("Failed to write {}", output))?;
        log::info!("{} consensus rows written to {}", table.len(), output);
    }

    Ok(())
}
