use std::path::Path;

use tfsage_core::models::RegionSet;

use crate::aggregate::compute_weighted_sum;
use crate::config::SynthesisOptions;
use crate::errors::{Result, SynthesisError};
use crate::intersect::{index_original_peaks, merge, multi_intersect, provenance};
use crate::table::{ConsensusRecord, ConsensusTable};

///
/// Combine N peak files into one consensus table with a support score per
/// interval.
///
/// Inputs are intersected at every breakpoint, merged back together within
/// `merge_distance`, optionally joined with the original peaks they came
/// from, and finally scored with [`compute_weighted_sum`].
///
/// # Arguments
/// - paths: peak files, optionally gzipped; empty files are allowed
/// - options: merge distance, weights and provenance flag
pub fn synthesize<P: AsRef<Path>>(paths: &[P], options: &SynthesisOptions) -> Result<ConsensusTable> {
    if paths.is_empty() {
        return Err(SynthesisError::NoInputs);
    }
    if let Some(weights) = &options.weights {
        if weights.len() != paths.len() {
            return Err(SynthesisError::WeightLengthMismatch {
                expected: paths.len(),
                found: weights.len(),
            });
        }
    }

    let sets = paths
        .iter()
        .map(|p| RegionSet::try_from(p.as_ref()).map(RegionSet::sorted))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let elementary = multi_intersect(&sets);
    let merged = merge(&elementary, options.merge_distance);
    log::info!(
        "{} elementary intervals from {} files merged into {} consensus intervals",
        elementary.len(),
        sets.len(),
        merged.len()
    );

    let records: Vec<ConsensusRecord> = match options.report_original_peaks {
        true => {
            let originals = index_original_peaks(&sets);
            merged
                .iter()
                .flat_map(|iv| {
                    provenance(iv, &originals)
                        .into_iter()
                        .map(move |p| ConsensusRecord::from_coverage(iv, Some(p)))
                })
                .collect()
        }
        false => merged
            .iter()
            .map(|iv| ConsensusRecord::from_coverage(iv, None))
            .collect(),
    };

    let table = ConsensusTable {
        n_inputs: sets.len(),
        records,
        with_provenance: options.report_original_peaks,
        weights: None,
    };

    compute_weighted_sum(table, options.weights.as_deref())
}
