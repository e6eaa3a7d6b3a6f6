//! The external embedding script and the files exchanged with it.

use std::path::{Path, PathBuf};
use std::process::Command;

use tfsage_core::models::{LabeledMatrix, MetadataTable};

use crate::errors::{EmbeddingError, Result};
use crate::exchange::{read_matrix, write_matrix, write_metadata};
use crate::method::EmbeddingMethod;

pub const RSCRIPT: &str = "Rscript";
pub const RP_MATRIX_FILE: &str = "rp_matrix.parquet";
pub const METADATA_FILE: &str = "metadata.parquet";
pub const DEFAULT_ALIGN_KEY: &str = "Assay";

///
/// An embedding script and the interpreter that runs it.
///
/// The script is called as
/// `<interpreter> <script> --rp-matrix F --metadata F --output-dir D --align-key K --method M1,M2`
/// and must write one `<method>.parquet` per method into the output directory.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingScript {
    pub interpreter: String,
    pub script: PathBuf,
}

impl EmbeddingScript {
    pub fn new<P: Into<PathBuf>>(script: P) -> Self {
        EmbeddingScript {
            interpreter: RSCRIPT.to_string(),
            script: script.into(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    pub fn command(
        &self,
        rp_matrix_file: &Path,
        metadata_file: &Path,
        output_dir: &Path,
        align_key: &str,
        methods: &[EmbeddingMethod],
    ) -> Command {
        let methods = methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script)
            .arg("--rp-matrix")
            .arg(rp_matrix_file)
            .arg("--metadata")
            .arg(metadata_file)
            .arg("--output-dir")
            .arg(output_dir)
            .arg("--align-key")
            .arg(align_key)
            .arg("--method")
            .arg(methods);
        cmd
    }
}

/// File the script writes for `method`.
pub fn output_file(output_dir: &Path, method: EmbeddingMethod) -> PathBuf {
    output_dir.join(format!("{}.parquet", method.as_str()))
}

///
/// Run the embedding script on files already on disk.
///
/// # Arguments
/// - script: script and interpreter
/// - rp_matrix_file: genes × samples parquet
/// - metadata_file: per-sample metadata parquet
/// - output_dir: where `<method>.parquet` files are written
/// - align_key: metadata column the samples are split on for integration
/// - methods: one or more integration methods
pub fn run_script(
    script: &EmbeddingScript,
    rp_matrix_file: &Path,
    metadata_file: &Path,
    output_dir: &Path,
    align_key: &str,
    methods: &[EmbeddingMethod],
) -> Result<()> {
    if methods.is_empty() {
        return Err(EmbeddingError::NoMethods);
    }
    if !script.script.exists() {
        return Err(EmbeddingError::ScriptNotFound(script.script.clone()));
    }

    let mut cmd = script.command(rp_matrix_file, metadata_file, output_dir, align_key, methods);
    log::info!("Running {:?}", cmd);

    let output = cmd.output()?;
    if !output.stdout.is_empty() {
        log::debug!("{}", String::from_utf8_lossy(&output.stdout));
    }
    if !output.status.success() {
        return Err(EmbeddingError::ScriptFailed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

///
/// Embed the samples of an RP matrix with one integration method.
///
/// Both tables are written to a scratch directory that is removed again on
/// every exit path. The result has one row per sample, labelled by the
/// `__index_level_0__` column of the script's output.
///
pub fn generate_embeddings(
    rp_matrix: &LabeledMatrix,
    metadata: &MetadataTable,
    align_key: &str,
    method: EmbeddingMethod,
    script: &EmbeddingScript,
) -> Result<LabeledMatrix> {
    if !metadata.columns.iter().any(|c| c == align_key) {
        return Err(EmbeddingError::UnknownAlignKey(align_key.to_string()));
    }

    let scratch = tempfile::Builder::new().prefix("tfsage-embed").tempdir()?;
    let rp_matrix_file = scratch.path().join(RP_MATRIX_FILE);
    let metadata_file = scratch.path().join(METADATA_FILE);
    write_matrix(rp_matrix, &rp_matrix_file)?;
    write_metadata(metadata, &metadata_file)?;

    run_script(
        script,
        &rp_matrix_file,
        &metadata_file,
        scratch.path(),
        align_key,
        &[method],
    )?;

    let embeddings_file = output_file(scratch.path(), method);
    if !embeddings_file.exists() {
        return Err(EmbeddingError::MissingOutput(embeddings_file));
    }
    let embeddings = read_matrix(&embeddings_file)?;
    log::info!(
        "{} embedding: {} samples x {} dimensions",
        method,
        embeddings.n_rows(),
        embeddings.n_cols()
    );

    Ok(embeddings)
}
