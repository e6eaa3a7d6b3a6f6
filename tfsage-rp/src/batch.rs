//! Parallel RP scoring of many samples into one gene × sample matrix.

use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tfsage_core::models::LabeledMatrix;
use tfsage_core::utils::strip_interval_extensions;

use crate::compute::compute_scores;
use crate::config::RpConfig;
use crate::errors::Result;
use crate::kernel::DecayKernel;
use crate::loci::GeneLocusSet;
use crate::pool::{default_workers, run_indexed};

/// Genes (rows, locus order) × samples (columns, input order).
pub type RpMatrix = LabeledMatrix;

///
/// Everything a worker needs besides the file it scores. Built once per
/// batch and handed by reference to every task; the locus set is never
/// copied or mutated.
///
#[derive(Debug, Clone)]
pub struct RpContext {
    pub loci: Arc<GeneLocusSet>,
    pub kernel: DecayKernel,
    pub strict_bounds: bool,
}

impl RpContext {
    pub fn new(loci: Arc<GeneLocusSet>, decay: f64, strict_bounds: bool) -> Result<Self> {
        Ok(RpContext {
            loci,
            kernel: DecayKernel::new(decay)?,
            strict_bounds,
        })
    }

    /// Score one peak file.
    pub fn score(&self, bed_file: &Path) -> Result<Vec<f64>> {
        compute_scores(bed_file, &self.loci, &self.kernel, self.strict_bounds)
    }
}

fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples scored")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

///
/// Compute the RP matrix of a list of peak files.
///
/// Column `i` always holds `bed_files[i]`, labelled with the file name
/// stripped of extensions. Any failing sample fails the whole batch.
///
/// # Arguments
/// - bed_files: peak files, one per sample
/// - loci: gene loci shared by every worker
/// - config: decay, worker bound, bounds policy and progress display
pub fn compute_batch<P>(
    bed_files: &[P],
    loci: Arc<GeneLocusSet>,
    config: &RpConfig,
) -> Result<RpMatrix>
where
    P: AsRef<Path> + Sync,
{
    let ctx = RpContext::new(loci, config.decay, config.strict_bounds)?;

    log::info!(
        "Scoring {} samples against {} loci with {} workers (decay {})",
        bed_files.len(),
        ctx.loci.len(),
        config.max_workers.unwrap_or_else(default_workers),
        config.decay
    );

    let pb = progress_bar(bed_files.len(), config.progress);
    let columns = run_indexed(
        &ctx,
        bed_files,
        config.max_workers,
        &pb,
        |path| path.as_ref().display().to_string(),
        |ctx, path| ctx.score(path.as_ref()),
    )?;
    pb.finish_and_clear();

    let samples = bed_files
        .iter()
        .map(|p| strip_interval_extensions(p.as_ref()))
        .collect();

    Ok(LabeledMatrix::from_columns(
        ctx.loci.names().to_vec(),
        samples,
        columns,
    )?)
}
