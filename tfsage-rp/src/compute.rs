//! Regulatory potential of one peak set against a gene locus set.

use std::path::Path;

use tfsage_core::models::{Interval, RegionSet};
use tfsage_core::utils::file_is_empty;
use tfsage_overlaprs::MultiChromOverlapper;

use crate::errors::Result;
use crate::kernel::DecayKernel;
use crate::loci::GeneLocusSet;

/// RP scores of one sample, one per gene, in locus order.
#[derive(Debug, Clone, PartialEq)]
pub struct RpVector {
    pub genes: Vec<String>,
    pub scores: Vec<f64>,
}

impl RpVector {
    pub fn get(&self, gene: &str) -> Option<f64> {
        self.genes
            .iter()
            .position(|g| g == gene)
            .map(|i| self.scores[i])
    }
}

///
/// Score a peak set: for every locus, sum the kernel over the midpoints of
/// all peaks within the kernel window of the locus midpoint.
///
pub fn score_region_set(
    peaks: &RegionSet,
    loci: &GeneLocusSet,
    kernel: &DecayKernel,
    strict_bounds: bool,
) -> Result<Vec<f64>> {
    if peaks.is_empty() {
        return Ok(vec![0.0; loci.len()]);
    }
    loci.genome.check_region_set(peaks, strict_bounds)?;

    // peaks are indexed as 1bp intervals at their midpoints
    let index: MultiChromOverlapper<u32, ()> =
        MultiChromOverlapper::from_intervals(peaks.regions.iter().map(|r| {
            let mid = r.mid_point();
            (
                r.chr.clone(),
                Interval {
                    start: mid,
                    end: mid.saturating_add(1),
                    val: (),
                },
            )
        }));

    let window = kernel.window();
    let scores: Vec<f64> = loci
        .loci
        .regions
        .iter()
        .map(|locus| {
            let center = locus.mid_point();
            let lo = center.saturating_sub(window);
            let hi = center.saturating_add(window).saturating_add(1);
            index
                .find_iter(&locus.chr, lo, hi)
                .map(|peak| kernel.contribution(peak.start.abs_diff(center)))
                .sum::<f64>()
        })
        .collect();

    Ok(scores)
}

///
/// Scores of one peak file, without gene names.
///
/// A zero-byte file, or one without any interval, gives all zeros.
///
pub fn compute_scores(
    bed_file: &Path,
    loci: &GeneLocusSet,
    kernel: &DecayKernel,
    strict_bounds: bool,
) -> Result<Vec<f64>> {
    if file_is_empty(bed_file)? {
        log::debug!("{} is empty, scoring as zeros", bed_file.display());
        return Ok(vec![0.0; loci.len()]);
    }
    let peaks = RegionSet::try_from(bed_file)?;
    score_region_set(&peaks, loci, kernel, strict_bounds)
}

///
/// Compute the RP vector of one peak file.
///
/// # Arguments
/// - bed_file: peaks of one sample
/// - loci: gene loci to score
/// - decay: bp over which a peak's contribution halves
/// - strict_bounds: reject peaks outside the loci's genome
pub fn compute<P: AsRef<Path>>(
    bed_file: P,
    loci: &GeneLocusSet,
    decay: f64,
    strict_bounds: bool,
) -> Result<RpVector> {
    let kernel = DecayKernel::new(decay)?;
    let scores = compute_scores(bed_file.as_ref(), loci, &kernel, strict_bounds)?;
    Ok(RpVector {
        genes: loci.names().to_vec(),
        scores,
    })
}
