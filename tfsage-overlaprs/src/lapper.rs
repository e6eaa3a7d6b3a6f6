use num_traits::{PrimInt, Unsigned, identities::zero};

use super::Overlapper;
use tfsage_core::models::Interval;

/// Intervals sorted by start, plus the length of the longest one.
///
/// A query `[start, end)` binary-searches to the first interval that could
/// still reach `start` (its start is at least `start - max_len`), then scans
/// forward until interval starts pass `end`. Works well for peak files,
/// where interval lengths are narrow and fairly uniform.
///
/// # Examples
///
/// ```
/// use tfsage_overlaprs::{Lapper, Overlapper, Interval};
///
/// let peaks = vec![
///     Interval { start: 100u32, end: 200, val: 0usize },
///     Interval { start: 150, end: 250, val: 1 },
///     Interval { start: 400, end: 500, val: 2 },
/// ];
/// let lapper = Lapper::build(peaks);
/// assert_eq!(lapper.count(180, 420), 3);
/// assert_eq!(lapper.count(260, 400), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Lapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    intervals: Vec<Interval<I, T>>,
    max_len: I,
}

impl<I, T> Lapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Index of the first interval whose start is `>= pos`.
    #[inline]
    fn lower_bound(&self, pos: I) -> usize {
        self.intervals.partition_point(|iv| iv.start < pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval<I, T>> {
        self.intervals.iter()
    }
}

impl<I, T> Overlapper<I, T> for Lapper<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(mut intervals: Vec<Interval<I, T>>) -> Self {
        intervals.sort();
        let max_len = intervals
            .iter()
            .map(|iv| iv.end.checked_sub(&iv.start).unwrap_or_else(zero::<I>))
            .max()
            .unwrap_or_else(zero::<I>);
        Lapper { intervals, max_len }
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        let first = self.lower_bound(start.saturating_sub(self.max_len));
        Box::new(
            self.intervals[first..]
                .iter()
                .take_while(move |iv| iv.start < end)
                .filter(move |iv| iv.overlap(start, end)),
        )
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn lapper() -> Lapper<u32, u32> {
        Lapper::build(vec![
            Interval { start: 500, end: 600, val: 3 },
            Interval { start: 0, end: 1000, val: 0 },
            Interval { start: 100, end: 150, val: 1 },
            Interval { start: 140, end: 160, val: 2 },
        ])
    }

    #[rstest]
    fn test_long_interval_found_from_far_right(lapper: Lapper<u32, u32>) {
        let mut hits: Vec<u32> = lapper.find(900, 950).iter().map(|iv| iv.val).collect();
        hits.sort();
        assert_eq!(hits, vec![0]);
    }

    #[rstest]
    #[case(145, 146, vec![0, 1, 2])]
    #[case(150, 160, vec![0, 2])]
    #[case(160, 500, vec![0])]
    #[case(1000, 2000, vec![])]
    fn test_find(lapper: Lapper<u32, u32>, #[case] start: u32, #[case] end: u32, #[case] expected: Vec<u32>) {
        let mut hits: Vec<u32> = lapper.find(start, end).iter().map(|iv| iv.val).collect();
        hits.sort();
        assert_eq!(hits, expected);
    }

    #[rstest]
    fn test_empty() {
        let lapper: Lapper<u32, ()> = Lapper::build(vec![]);
        assert!(lapper.is_empty());
        assert_eq!(lapper.count(0, 100), 0);
    }
}
