use anyhow::{Context, Result};
use clap::ArgMatches;

use tfsage_core::models::{LabeledMatrix, MetadataTable};
use tfsage_embed::script::{DEFAULT_ALIGN_KEY, RSCRIPT};
use tfsage_embed::{EmbeddingMethod, EmbeddingScript, generate_embeddings};

pub fn run_embed(matches: &ArgMatches) -> Result<()> {
    let rp_matrix_path = matches
        .get_one::<String>("rp-matrix")
        .context("--rp-matrix is required")?;
    let metadata_path = matches
        .get_one::<String>("metadata")
        .context("--metadata is required")?;
    let script = matches
        .get_one::<String>("script")
        .context("--script is required")?;
    let output = matches
        .get_one::<String>("output")
        .context("--output is required")?;
    let align_key = matches
        .get_one::<String>("align-key")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ALIGN_KEY);
    let interpreter = matches
        .get_one::<String>("interpreter")
        .map(String::as_str)
        .unwrap_or(RSCRIPT);

    // validate before reading the matrix
    let method: EmbeddingMethod = match matches.get_one::<String>("method") {
        Some(m) => m.parse()?,
        None => EmbeddingMethod::default(),
    };

    let rp_matrix = LabeledMatrix::from_tsv(rp_matrix_path)
        .with_context(|| format!("Failed to read RP matrix: {}", rp_matrix_path))?;
    let metadata = MetadataTable::from_tsv(metadata_path)
        .with_context(|| format!("Failed to read metadata: {}", metadata_path))?;

    let script = EmbeddingScript::new(script).with_interpreter(interpreter);
    let embeddings = generate_embeddings(&rp_matrix, &metadata, align_key, method, &script)?;

    embeddings
        .write_tsv(output)
        .with_context(|| format!("Failed to write {}", output))?;

    Ok(())
}
