//! Genome-wide interval indexing for overlap queries across chromosomes.
//!
//! [`MultiChromOverlapper`] keeps one [`Lapper`](crate::Lapper) per
//! chromosome. It can be built straight from a [`RegionSet`] or from any
//! iterator of `(chromosome, interval)` pairs when the payload is something
//! other than the region's trailing columns.
//!
//! ```
//! use tfsage_overlaprs::multi_chrom_overlapper::IntoMultiChromOverlapper;
//! use tfsage_core::models::{Region, RegionSet};
//!
//! let genes = RegionSet::from(vec![
//!     Region { chr: "chr1".to_string(), start: 1000, end: 2000, rest: Some("BRCA1".to_string()) },
//!     Region { chr: "chr2".to_string(), start: 1000, end: 3000, rest: Some("EGFR".to_string()) },
//! ]);
//! let index = genes.into_multi_chrom_overlapper();
//!
//! let query = RegionSet::from(vec![
//!     Region { chr: "chr2".to_string(), start: 2000, end: 4000, rest: None },
//! ]);
//! assert_eq!(index.find_overlaps(&query).len(), 1);
//! ```

use std::fmt::Debug;

use fxhash::FxHashMap;
use num_traits::{PrimInt, Unsigned};
use tfsage_core::models::{Interval, Region, RegionSet};

use crate::{Lapper, Overlapper};

/// One overlap index per chromosome.
pub struct MultiChromOverlapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    index_maps: FxHashMap<String, Lapper<I, T>>,
}

impl<I, T> MultiChromOverlapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync + Debug,
    T: Eq + Clone + Send + Sync + Debug,
{
    /// Build from `(chromosome, interval)` pairs in any order.
    pub fn from_intervals<It>(intervals: It) -> Self
    where
        It: IntoIterator<Item = (String, Interval<I, T>)>,
    {
        let mut grouped: FxHashMap<String, Vec<Interval<I, T>>> = FxHashMap::default();
        for (chr, interval) in intervals {
            grouped.entry(chr).or_default().push(interval);
        }

        let index_maps = grouped
            .into_iter()
            .map(|(chr, ivs)| (chr, Lapper::build(ivs)))
            .collect();

        MultiChromOverlapper { index_maps }
    }

    /// Intervals on `chr` overlapping `[start, end)`.
    pub fn find_iter<'a>(
        &'a self,
        chr: &str,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        match self.index_maps.get(chr) {
            Some(lapper) => lapper.find_iter(start, end),
            None => Box::new(std::iter::empty::<&'a Interval<I, T>>()),
        }
    }

    /// True if anything on `chr` overlaps `[start, end)`.
    pub fn any_overlap(&self, chr: &str, start: I, end: I) -> bool {
        self.find_iter(chr, start, end).next().is_some()
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.index_maps.keys()
    }

    pub fn len(&self) -> usize {
        self.index_maps.values().map(|l| l.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> MultiChromOverlapper<u32, T>
where
    T: Eq + Clone + Send + Sync + Debug,
{
    /// Collect every `(chromosome, interval)` overlapping any query region.
    pub fn find_overlaps(&self, rs: &RegionSet) -> Vec<(String, Interval<u32, T>)> {
        rs.regions
            .iter()
            .flat_map(|r| {
                self.find_iter(&r.chr, r.start, r.end)
                    .map(move |iv| (r.chr.clone(), iv.clone()))
            })
            .collect()
    }

    /// True if anything overlaps `region`.
    pub fn overlaps_region(&self, region: &Region) -> bool {
        self.any_overlap(&region.chr, region.start, region.end)
    }
}

/// Turn region-based data into a [`MultiChromOverlapper`].
pub trait IntoMultiChromOverlapper<T>
where
    T: Eq + Clone + Send + Sync,
{
    fn into_multi_chrom_overlapper(self) -> MultiChromOverlapper<u32, T>;
}

impl IntoMultiChromOverlapper<Option<String>> for RegionSet {
    fn into_multi_chrom_overlapper(self) -> MultiChromOverlapper<u32, Option<String>> {
        MultiChromOverlapper::from_intervals(self.regions.into_iter().map(|r| {
            (
                r.chr,
                Interval {
                    start: r.start,
                    end: r.end,
                    val: r.rest,
                },
            )
        }))
    }
}

impl IntoMultiChromOverlapper<()> for &RegionSet {
    fn into_multi_chrom_overlapper(self) -> MultiChromOverlapper<u32, ()> {
        MultiChromOverlapper::from_intervals(self.regions.iter().map(|r| {
            (
                r.chr.clone(),
                Interval {
                    start: r.start,
                    end: r.end,
                    val: (),
                },
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn region(chr: &str, start: u32, end: u32) -> Region {
        Region {
            chr: chr.to_string(),
            start,
            end,
            rest: None,
        }
    }

    #[rstest]
    fn test_queries_respect_chromosome() {
        let rs = RegionSet::from(vec![
            region("chr1", 100, 200),
            region("chr1", 300, 400),
            region("chr2", 100, 200),
        ]);
        let index = (&rs).into_multi_chrom_overlapper();

        assert_eq!(index.len(), 3);
        assert!(index.overlaps_region(&region("chr2", 150, 160)));
        assert!(!index.overlaps_region(&region("chr3", 150, 160)));
        assert!(!index.overlaps_region(&region("chr1", 200, 300)));

        let hits = index.find_overlaps(&RegionSet::from(vec![region("chr1", 150, 350)]));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(chr, _)| chr == "chr1"));
    }

    #[rstest]
    fn test_payloads_are_kept() {
        let rs = RegionSet::from(vec![Region {
            chr: "chr1".to_string(),
            start: 10,
            end: 20,
            rest: Some("peak_1".to_string()),
        }]);
        let index = rs.into_multi_chrom_overlapper();
        let hits: Vec<_> = index.find_iter("chr1", 0, 15).collect();
        assert_eq!(hits[0].val.as_deref(), Some("peak_1"));
    }
}
