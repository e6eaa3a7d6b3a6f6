use crate::errors::{Result, SynthesisError};
use crate::table::ConsensusTable;

///
/// Score every consensus interval by its (weighted) support.
///
/// Indicators are rescaled from `{0, 1}` to `{-1, 1}` so that absence
/// counts against an interval as much as presence counts for it. Without
/// weights the support is the plain sum; with weights it is the dot
/// product and the weights are kept on the table.
///
/// # Arguments
/// - table: freshly synthesized table with `0`/`1` indicators
/// - weights: one weight per input file, or `None` for uniform
pub fn compute_weighted_sum(
    mut table: ConsensusTable,
    weights: Option<&[f64]>,
) -> Result<ConsensusTable> {
    if let Some(w) = weights {
        if w.len() != table.n_inputs {
            return Err(SynthesisError::WeightLengthMismatch {
                expected: table.n_inputs,
                found: w.len(),
            });
        }
    }

    for record in table.records.iter_mut() {
        for v in record.indicators.iter_mut() {
            *v = 2.0 * *v - 1.0;
        }
        let support: f64 = match weights {
            Some(w) => record.indicators.iter().zip(w).map(|(v, w)| v * w).sum(),
            None => record.indicators.iter().sum(),
        };
        record.support = Some(support);
    }
    table.weights = weights.map(<[f64]>::to_vec);

    Ok(table)
}
