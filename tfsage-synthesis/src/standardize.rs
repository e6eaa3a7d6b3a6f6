//! Midpoints and fixed-width re-centering of consensus intervals.

use std::io::Write;
use std::path::Path;

use fxhash::{FxHashMap, FxHashSet};
use tfsage_core::utils::get_dynamic_writer;

use crate::errors::{Result, SynthesisError};
use crate::table::{ConsensusRecord, ConsensusTable};

/// A deduplicated consensus interval with its center.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedRecord {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub midpoint: f64,
    pub indicators: Vec<f64>,
    pub support: Option<f64>,
}

impl StandardizedRecord {
    fn from_record(record: &ConsensusRecord, midpoint: f64) -> Self {
        StandardizedRecord {
            chr: record.chr.clone(),
            start: record.start,
            end: record.end,
            midpoint,
            indicators: record.indicators.clone(),
            support: record.support,
        }
    }
}

pub fn geometric_midpoint(start: u32, end: u32) -> f64 {
    (f64::from(start) + f64::from(end)) / 2.0
}

///
/// Interval of exactly `width` bp centered on `midpoint`.
///
/// The left edge is `floor(midpoint - width / 2)`; it is clamped at 0, in
/// which case the interval is shorter than `width`.
///
pub fn fixed_width(midpoint: f64, width: u32) -> (u32, u32) {
    let left = (midpoint - f64::from(width) / 2.0).floor() as i64;
    let max = i64::from(u32::MAX);
    let start = left.clamp(0, max) as u32;
    let end = (left + i64::from(width)).clamp(0, max) as u32;
    (start, end)
}

///
/// Collapse a consensus table to one row per interval and attach a midpoint,
/// optionally re-centering every interval to a fixed width.
///
/// # Arguments
/// - table: output of [`synthesize`](crate::synthesize)
/// - weighted: pull each midpoint toward the original peaks of the more
///   heavily weighted inputs; needs provenance and weights on the table
/// - width: re-center to this many bp, or keep the coordinates
pub fn standardize(
    table: &ConsensusTable,
    weighted: bool,
    width: Option<u32>,
) -> Result<Vec<StandardizedRecord>> {
    if width == Some(0) {
        return Err(SynthesisError::InvalidWidth);
    }

    let mut records = match weighted {
        true => weighted_midpoints(table)?,
        false => midpoints(table),
    };

    if let Some(width) = width {
        for record in records.iter_mut() {
            (record.start, record.end) = fixed_width(record.midpoint, width);
        }
    }

    Ok(records)
}

fn midpoints(table: &ConsensusTable) -> Vec<StandardizedRecord> {
    let mut seen: FxHashSet<(&str, u32, u32)> = FxHashSet::default();
    table
        .records
        .iter()
        .filter(|r| seen.insert((r.chr.as_str(), r.start, r.end)))
        .map(|r| StandardizedRecord::from_record(r, geometric_midpoint(r.start, r.end)))
        .collect()
}

fn weighted_midpoints(table: &ConsensusTable) -> Result<Vec<StandardizedRecord>> {
    if !table.with_provenance {
        return Err(SynthesisError::MissingProvenance);
    }
    let weights = table
        .weights
        .as_deref()
        .ok_or(SynthesisError::MissingWeights)?;

    // (record, Σ midpoint·weight, Σ weight) in order of first appearance
    let mut groups: Vec<(StandardizedRecord, f64, f64)> = Vec::new();
    let mut slots: FxHashMap<(&str, u32, u32), usize> = FxHashMap::default();

    for record in &table.records {
        let Some(original) = &record.provenance else {
            continue;
        };
        let slot = *slots
            .entry((record.chr.as_str(), record.start, record.end))
            .or_insert_with(|| {
                groups.push((StandardizedRecord::from_record(record, 0.0), 0.0, 0.0));
                groups.len() - 1
            });

        let weight = weights.get(original.idx).copied().unwrap_or(0.0);
        let group = &mut groups[slot];
        group.1 += geometric_midpoint(original.start, original.end) * weight;
        group.2 += weight;
    }

    Ok(groups
        .into_iter()
        .map(|(mut record, weighted_sum, weight_sum)| {
            record.midpoint = if weight_sum == 0.0 {
                log::warn!(
                    "Weights of the peaks under {}:{}-{} sum to zero, using its geometric midpoint",
                    record.chr,
                    record.start,
                    record.end
                );
                geometric_midpoint(record.start, record.end)
            } else {
                weighted_sum / weight_sum
            };
            record
        })
        .collect())
}

/// Write standardized intervals as a headed TSV (gzipped for `.gz`).
pub fn write_standardized<P: AsRef<Path>>(records: &[StandardizedRecord], path: P) -> Result<()> {
    let n_inputs = records.first().map(|r| r.indicators.len()).unwrap_or(0);
    let mut writer = get_dynamic_writer(path.as_ref())?;

    let mut header = vec!["chrom".to_string(), "start".to_string(), "end".to_string()];
    header.extend((0..n_inputs).map(|i| format!("file_{}", i)));
    header.push("support".to_string());
    header.push("midpoint".to_string());
    writeln!(writer, "{}", header.join("\t"))?;

    for r in records {
        let mut fields = vec![r.chr.clone(), r.start.to_string(), r.end.to_string()];
        fields.extend(r.indicators.iter().map(|v| v.to_string()));
        fields.push(r.support.map(|s| s.to_string()).unwrap_or_else(|| ".".to_string()));
        fields.push(r.midpoint.to_string());
        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::Provenance;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(start: u32, end: u32, original: Option<(u32, u32, usize)>) -> ConsensusRecord {
        ConsensusRecord {
            chr: "chr1".to_string(),
            start,
            end,
            indicators: vec![1.0, 1.0],
            support_count: 2,
            provenance: original.map(|(s, e, idx)| Provenance {
                chr: "chr1".to_string(),
                start: s,
                end: e,
                idx,
                overlap: e.min(end) - s.max(start),
            }),
            support: Some(2.0),
        }
    }

    fn provenance_table(weights: Vec<f64>) -> ConsensusTable {
        ConsensusTable {
            n_inputs: 2,
            records: vec![
                record(100, 250, Some((100, 200, 0))),
                record(100, 250, Some((150, 250, 1))),
                record(1000, 1100, Some((1000, 1100, 1))),
            ],
            with_provenance: true,
            weights: Some(weights),
        }
    }

    #[rstest]
    #[case(175.0, 100, (125, 225))]
    #[case(175.5, 100, (125, 225))]
    #[case(175.0, 101, (124, 225))]
    #[case(30.0, 100, (0, 80))]
    #[case(0.0, 200, (0, 100))]
    fn test_fixed_width(#[case] midpoint: f64, #[case] width: u32, #[case] expected: (u32, u32)) {
        assert_eq!(fixed_width(midpoint, width), expected);
    }

    #[rstest]
    fn test_fixed_width_is_exact_away_from_zero() {
        for mid in (1000..1400).map(|m| m as f64 * 0.5) {
            for width in [1, 2, 99, 100, 200, 501] {
                let (start, end) = fixed_width(mid, width);
                assert_eq!(end - start, width);
            }
        }
    }

    #[rstest]
    fn test_unweighted_drops_duplicates() {
        let table = provenance_table(vec![1.0, 1.0]);
        let records = standardize(&table, false, None).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!((records[0].start, records[0].end), (100, 250));
        assert_eq!(records[0].midpoint, 175.0);
        assert_eq!(records[1].midpoint, 1050.0);
    }

    #[rstest]
    fn test_unweighted_fixed_width() {
        let table = provenance_table(vec![1.0, 1.0]);
        let records = standardize(&table, false, Some(100)).unwrap();
        assert_eq!((records[0].start, records[0].end), (125, 225));
        assert_eq!((records[1].start, records[1].end), (1000, 1100));
    }

    #[rstest]
    fn test_weighted_midpoint_follows_heavier_input() {
        let table = provenance_table(vec![3.0, 1.0]);
        let records = standardize(&table, true, Some(100)).unwrap();

        // (150 * 3 + 200 * 1) / 4
        assert_eq!(records[0].midpoint, 162.5);
        assert_eq!((records[0].start, records[0].end), (112, 212));
        assert_eq!(records[1].midpoint, 1050.0);
    }

    #[rstest]
    fn test_zero_weight_sum_falls_back_to_geometric() {
        let table = provenance_table(vec![1.0, -1.0]);
        let records = standardize(&table, true, None).unwrap();
        assert_eq!(records[0].midpoint, 175.0);
    }

    #[rstest]
    fn test_weighted_requires_provenance_and_weights() {
        let mut table = provenance_table(vec![1.0, 1.0]);
        table.weights = None;
        assert!(matches!(
            standardize(&table, true, None),
            Err(SynthesisError::MissingWeights)
        ));

        table.with_provenance = false;
        assert!(matches!(
            standardize(&table, true, None),
            Err(SynthesisError::MissingProvenance)
        ));
    }

    #[rstest]
    fn test_zero_width_rejected() {
        let table = provenance_table(vec![1.0, 1.0]);
        assert!(matches!(
            standardize(&table, false, Some(0)),
            Err(SynthesisError::InvalidWidth)
        ));
    }
}
