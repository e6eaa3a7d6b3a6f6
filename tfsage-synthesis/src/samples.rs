//! Labelled positive/negative regions for evaluating a predicted peak set.

use std::io::Write;
use std::path::Path;

use fxhash::FxHashSet;
use tfsage_core::models::{Region, RegionSet};
use tfsage_core::utils::get_dynamic_writer;
use tfsage_overlaprs::IntoMultiChromOverlapper;

use crate::errors::{Result, SynthesisError};
use crate::intersect::multi_intersect;
use crate::standardize::{fixed_width, geometric_midpoint};

/// A region labelled by which sample set covers it.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSample {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub num: usize,
    /// 1-based labels of the covering sets: 1 = positive, 2 = negative.
    pub list: Vec<usize>,
    pub positive: bool,
    pub negative: bool,
}

impl TestSample {
    /// `list` as rendered in output files, e.g. `1,2`.
    pub fn list_label(&self) -> String {
        self.list
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Regions of `a` that share no base with any region of `b`.
pub fn subtract(a: &RegionSet, b: &RegionSet) -> RegionSet {
    let index = b.into_multi_chrom_overlapper();
    RegionSet::from(
        a.regions
            .iter()
            .filter(|r| !index.overlaps_region(r))
            .cloned()
            .collect::<Vec<_>>(),
    )
}

/// Deduplicate and re-center every region to `width` bp.
pub fn recenter(set: &RegionSet, width: u32) -> RegionSet {
    let mut seen: FxHashSet<(&str, u32, u32)> = FxHashSet::default();
    let regions: Vec<Region> = set
        .regions
        .iter()
        .filter(|r| seen.insert((r.chr.as_str(), r.start, r.end)))
        .map(|r| {
            let (start, end) = fixed_width(geometric_midpoint(r.start, r.end), width);
            Region {
                chr: r.chr.clone(),
                start,
                end,
                rest: None,
            }
        })
        .collect();
    RegionSet::from(regions)
}

///
/// Build test samples from a query peak set and a target peak set.
///
/// Positives are the target regions (re-centered when `width` is given).
/// Negatives are query regions overlapping neither the target nor the
/// positives; when re-centered they are checked against both again, since
/// a wider window can reach into excluded territory.
///
/// # Arguments
/// - query: candidate regions, e.g. a predicted peak set
/// - target: ground-truth regions
/// - width: fixed sample width in bp, or `None` to keep coordinates
pub fn generate_test_samples<P: AsRef<Path>>(
    query: P,
    target: P,
    width: Option<u32>,
) -> Result<Vec<TestSample>> {
    if width == Some(0) {
        return Err(SynthesisError::InvalidWidth);
    }

    let query = RegionSet::try_from(query.as_ref())?;
    let target = RegionSet::try_from(target.as_ref())?;

    let positives = match width {
        Some(w) => recenter(&target, w),
        None => target.clone(),
    };

    let mut negatives = subtract(&subtract(&query, &target), &positives);
    if let Some(w) = width {
        negatives = subtract(&subtract(&recenter(&negatives, w), &target), &positives);
    }

    let positives = positives.sorted();
    let negatives = negatives.sorted();
    log::info!(
        "{} positive and {} negative samples from {} query regions",
        positives.len(),
        negatives.len(),
        query.len()
    );

    Ok(multi_intersect(&[positives, negatives])
        .into_iter()
        .map(|iv| TestSample {
            num: iv.num(),
            list: iv.list(),
            positive: iv.covered[0],
            negative: iv.covered[1],
            chr: iv.chr,
            start: iv.start,
            end: iv.end,
        })
        .collect())
}

/// Write samples as a headed TSV: `chrom start end num list positive negative`.
pub fn write_test_samples<P: AsRef<Path>>(samples: &[TestSample], path: P) -> Result<()> {
    let mut writer = get_dynamic_writer(path.as_ref())?;
    writeln!(writer, "chrom\tstart\tend\tnum\tlist\tpositive\tnegative")?;
    for s in samples {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            s.chr,
            s.start,
            s.end,
            s.num,
            s.list_label(),
            s.positive as u8,
            s.negative as u8
        )?;
    }
    writer.flush()?;
    Ok(())
}
