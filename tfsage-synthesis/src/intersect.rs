//! Multi-way intersection of interval sets and merging of the result.
//!
//! [`multi_intersect`] splits every chromosome at each start and end seen in
//! any input and flags, for each elementary piece, which inputs cover it.
//! [`merge`] then joins neighbouring pieces back into consensus intervals.

use std::collections::BTreeMap;

use tfsage_core::models::{Interval, RegionSet};
use tfsage_overlaprs::MultiChromOverlapper;

/// An interval with one coverage flag per input set.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageInterval {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub covered: Vec<bool>,
}

impl CoverageInterval {
    /// Number of input sets covering this interval.
    pub fn num(&self) -> usize {
        self.covered.iter().filter(|c| **c).count()
    }

    /// 1-based labels of the covering sets.
    pub fn list(&self) -> Vec<usize> {
        self.covered
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| i + 1)
            .collect()
    }
}

///
/// Elementary intervals of N region sets.
///
/// Chromosomes come out in lexicographic order, intervals by position.
/// Only pieces covered by at least one input are reported; an input with
/// several overlapping intervals still counts once. Zero-length intervals
/// cover nothing.
///
pub fn multi_intersect(sets: &[RegionSet]) -> Vec<CoverageInterval> {
    let mut events: BTreeMap<&str, Vec<(u32, usize, i64)>> = BTreeMap::new();
    for (idx, set) in sets.iter().enumerate() {
        for region in set {
            if region.start == region.end {
                continue;
            }
            let chr_events = events.entry(region.chr.as_str()).or_default();
            chr_events.push((region.start, idx, 1));
            chr_events.push((region.end, idx, -1));
        }
    }

    let mut result = Vec::new();
    for (chr, mut chr_events) in events {
        chr_events.sort_unstable_by_key(|e| e.0);

        let mut depth = vec![0i64; sets.len()];
        let mut k = 0;
        while k < chr_events.len() {
            let pos = chr_events[k].0;
            while k < chr_events.len() && chr_events[k].0 == pos {
                let (_, idx, delta) = chr_events[k];
                depth[idx] += delta;
                k += 1;
            }

            if k < chr_events.len() && depth.iter().any(|d| *d > 0) {
                result.push(CoverageInterval {
                    chr: chr.to_string(),
                    start: pos,
                    end: chr_events[k].0,
                    covered: depth.iter().map(|d| *d > 0).collect(),
                });
            }
        }
    }

    result
}

///
/// Merge sorted intervals whose gap is at most `merge_distance`.
///
/// Book-ended intervals merge even at distance 0. Coverage flags of merged
/// pieces are combined per input.
///
pub fn merge(intervals: &[CoverageInterval], merge_distance: u32) -> Vec<CoverageInterval> {
    let mut merged: Vec<CoverageInterval> = Vec::new();

    for iv in intervals {
        match merged.last_mut() {
            Some(current)
                if current.chr == iv.chr
                    && u64::from(iv.start) <= u64::from(current.end) + u64::from(merge_distance) =>
            {
                current.end = current.end.max(iv.end);
                for (c, v) in current.covered.iter_mut().zip(&iv.covered) {
                    *c |= *v;
                }
            }
            _ => merged.push(iv.clone()),
        }
    }

    merged
}

/// An original peak overlapping a merged interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    /// Index of the input file the peak came from.
    pub idx: usize,
    /// Overlap with the merged interval, in bp.
    pub overlap: u32,
}

/// Index every original peak, tagged with the position of its set.
pub fn index_original_peaks(sets: &[RegionSet]) -> MultiChromOverlapper<u32, usize> {
    MultiChromOverlapper::from_intervals(sets.iter().enumerate().flat_map(|(idx, set)| {
        set.regions.iter().map(move |r| {
            (
                r.chr.clone(),
                Interval {
                    start: r.start,
                    end: r.end,
                    val: idx,
                },
            )
        })
    }))
}

/// Original peaks overlapping `iv` by at least one base, by position then source.
pub fn provenance(
    iv: &CoverageInterval,
    originals: &MultiChromOverlapper<u32, usize>,
) -> Vec<Provenance> {
    let mut hits: Vec<Provenance> = originals
        .find_iter(&iv.chr, iv.start, iv.end)
        .map(|o| Provenance {
            chr: iv.chr.clone(),
            start: o.start,
            end: o.end,
            idx: o.val,
            overlap: o.intersect(iv.start, iv.end),
        })
        .filter(|p| p.overlap > 0)
        .collect();
    hits.sort_by_key(|p| (p.start, p.end, p.idx));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tfsage_core::models::Region;

    fn make_regionset(regions: Vec<(&str, u32, u32)>) -> RegionSet {
        RegionSet::from(
            regions
                .into_iter()
                .map(|(chr, start, end)| Region {
                    chr: chr.to_string(),
                    start,
                    end,
                    rest: None,
                })
                .collect::<Vec<_>>(),
        )
    }

    fn coverage(chr: &str, start: u32, end: u32, covered: &[bool]) -> CoverageInterval {
        CoverageInterval {
            chr: chr.to_string(),
            start,
            end,
            covered: covered.to_vec(),
        }
    }

    #[rstest]
    fn test_elementary_intervals() {
        let a = make_regionset(vec![("chr1", 100, 200)]);
        let b = make_regionset(vec![("chr1", 150, 250)]);

        assert_eq!(
            multi_intersect(&[a, b]),
            vec![
                coverage("chr1", 100, 150, &[true, false]),
                coverage("chr1", 150, 200, &[true, true]),
                coverage("chr1", 200, 250, &[false, true]),
            ]
        );
    }

    #[rstest]
    fn test_self_overlap_counts_once_and_gaps_are_skipped() {
        let a = make_regionset(vec![("chr1", 0, 10), ("chr1", 5, 20), ("chr1", 40, 50)]);
        let result = multi_intersect(&[a]);

        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|iv| iv.covered == vec![true]));
        assert_eq!((result[2].start, result[2].end), (10, 20));
        assert_eq!((result[3].start, result[3].end), (40, 50));
    }

    #[rstest]
    fn test_chromosomes_are_lexicographic() {
        let a = make_regionset(vec![("chr2", 0, 10), ("chr10", 0, 10), ("chr1", 0, 10)]);
        let chroms: Vec<String> = multi_intersect(&[a]).into_iter().map(|iv| iv.chr).collect();
        assert_eq!(chroms, vec!["chr1", "chr10", "chr2"]);
    }

    #[rstest]
    fn test_num_and_list() {
        let iv = coverage("chr1", 0, 10, &[false, true, true]);
        assert_eq!(iv.num(), 2);
        assert_eq!(iv.list(), vec![2, 3]);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(9, 2)]
    #[case(10, 1)]
    fn test_merge_distance(#[case] distance: u32, #[case] expected: usize) {
        let intervals = vec![
            coverage("chr1", 100, 200, &[true, false]),
            coverage("chr1", 200, 210, &[false, true]),
            coverage("chr1", 220, 300, &[false, true]),
        ];
        let merged = merge(&intervals, distance);
        assert_eq!(merged.len(), expected);
        assert_eq!(merged[0].start, 100);
        assert_eq!(merged[0].covered, vec![true, true]);
        assert_eq!(merged.last().unwrap().end, 300);
    }

    #[rstest]
    fn test_merge_never_crosses_chromosomes() {
        let intervals = vec![
            coverage("chr1", 100, 200, &[true]),
            coverage("chr2", 0, 50, &[true]),
        ];
        assert_eq!(merge(&intervals, 1_000).len(), 2);
    }

    #[rstest]
    fn test_provenance_reports_overlap() {
        let a = make_regionset(vec![("chr1", 100, 200)]);
        let b = make_regionset(vec![("chr1", 150, 250), ("chr1", 250, 260)]);
        let originals = index_original_peaks(&[a, b]);

        let merged = coverage("chr1", 100, 250, &[true, true]);
        let hits = provenance(&merged, &originals);

        assert_eq!(
            hits,
            vec![
                Provenance {
                    chr: "chr1".to_string(),
                    start: 100,
                    end: 200,
                    idx: 0,
                    overlap: 100
                },
                Provenance {
                    chr: "chr1".to_string(),
                    start: 150,
                    end: 250,
                    idx: 1,
                    overlap: 100
                },
            ]
        );
    }
}
