use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_core::utils::get_dynamic_writer;
use tfsage_rp::loci::resolve_assets_dir;
use tfsage_rp::{GeneLocusSet, GenomeBuild, RpConfig, compute};

///
/// Read `--config` if given, then let the shared RP flags override it.
///
pub fn rp_config_from_matches(matches: &ArgMatches) -> Result<RpConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RpConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => RpConfig::default(),
    };

    if let Some(genome) = matches.get_one::<String>("genome") {
        config.genome = genome.clone();
    }
    if let Some(decay) = matches.get_one::<f64>("decay") {
        config.decay = *decay;
    }
    if let Some(dir) = matches.get_one::<String>("assets-dir") {
        config.assets_dir = Some(dir.into());
    }
    if matches.get_flag("strict-bounds") {
        config.strict_bounds = true;
    }

    Ok(config)
}

pub fn load_loci(config: &RpConfig) -> Result<GeneLocusSet> {
    let build: GenomeBuild = config.genome.parse()?;
    let assets_dir = resolve_assets_dir(config.assets_dir.as_deref())?;
    GeneLocusSet::load(build, &assets_dir)
        .with_context(|| format!("Failed to load {} loci from {}", build, assets_dir.display()))
}

pub fn run_rp(matches: &ArgMatches) -> Result<()> {
    let bed = matches
        .get_one::<String>("bed")
        .context("--bed is required")?;
    let config = rp_config_from_matches(matches)?;
    let loci = load_loci(&config)?;

    let rp = compute(bed, &loci, config.decay, config.strict_bounds)
        .with_context(|| format!("Failed to score {}", bed))?;

    let mut out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(p) => get_dynamic_writer(Path::new(p))
            .with_context(|| format!("Failed to create output file: {}", p))?,
        None => Box::new(io::stdout().lock()),
    };
    for (gene, score) in rp.genes.iter().zip(&rp.scores) {
        writeln!(out, "{}\t{}", gene, score)?;
    }
    out.flush()?;

    Ok(())
}
