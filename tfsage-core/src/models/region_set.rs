use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::errors::{RegionSetError, Result};
use crate::models::Region;
use crate::utils::{get_dynamic_reader, get_dynamic_writer};

///
/// RegionSet struct, the representation of an interval file such as a bed
/// file. Regions keep the order they were read in until [RegionSet::sort]
/// is called.
///
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

fn parse_coordinate(field: Option<&str>, line: &str) -> Result<u32> {
    field
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| RegionSetError::RegionParseError(line.to_string()))
}

/// A first line is a header when it has no numeric coordinate at all.
fn is_column_header(start: Option<&str>, end: Option<&str>) -> bool {
    let is_number = |f: &str| f.trim().parse::<i64>().is_ok();
    match (start, end) {
        (Some(s), Some(e)) => !is_number(s) && !is_number(e),
        (Some(s), None) => !is_number(s),
        (None, _) => true,
    }
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a bed file. Empty files give an empty set.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk, optionally gzipped.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;

        let mut regions: Vec<Region> = Vec::new();
        let mut header = String::new();
        let mut first_line = true;

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if line.starts_with("browser") | line.starts_with("track") | line.starts_with('#') {
                header.push_str(&line);
                continue;
            }

            let mut parts = line.splitn(4, '\t');
            let chr = parts
                .next()
                .ok_or_else(|| RegionSetError::RegionParseError(line.clone()))?;
            let start_field = parts.next();
            let end_field = parts.next();

            // column headers like `chrom start end` without a leading #
            if first_line {
                first_line = false;
                if is_column_header(start_field, end_field) {
                    header.push_str(&line);
                    continue;
                }
            }

            let start = parse_coordinate(start_field, &line)?;
            let end = parse_coordinate(end_field, &line)?;
            let rest = parts.next().map(str::to_string).filter(|s| !s.is_empty());

            regions.push(Region::new(chr, start, end, rest)?);
        }

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl RegionSet {
    ///
    /// Save a regionset to disk as a bed file (gzipped when the path ends in `.gz`)
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn write_bed<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        for region in &self.regions {
            writeln!(writer, "{}", region.as_string())?;
        }
        writer.flush()?;
        Ok(())
    }

    ///
    /// Sort regions by chromosome name, then start, then end.
    /// The original order is overwritten.
    ///
    pub fn sort(&mut self) {
        self.regions.sort_by(|a, b| {
            a.chr
                .cmp(&b.chr)
                .then_with(|| a.start.cmp(&b.start))
                .then_with(|| a.end.cmp(&b.end))
        });
    }

    /// Sorted copy.
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/regionset")
            .join(file_name)
    }

    #[rstest]
    fn test_open_from_path_keeps_file_order() {
        let rs = RegionSet::try_from(get_test_path("unsorted.bed")).unwrap();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs.regions[0].chr, "chr2");
        assert_eq!(rs.regions[2].start, 100);
    }

    #[rstest]
    fn test_sort() {
        let rs = RegionSet::try_from(get_test_path("unsorted.bed"))
            .unwrap()
            .sorted();
        let starts: Vec<(String, u32)> = rs
            .regions
            .iter()
            .map(|r| (r.chr.clone(), r.start))
            .collect();
        assert_eq!(
            starts,
            vec![
                ("chr1".to_string(), 100),
                ("chr1".to_string(), 500),
                ("chr2".to_string(), 50)
            ]
        );
    }

    #[rstest]
    fn test_empty_file_gives_empty_set() {
        let rs = RegionSet::try_from(get_test_path("empty.bed")).unwrap();
        assert!(rs.is_empty());
    }

    #[rstest]
    fn test_header_lines_skipped() {
        let rs = RegionSet::try_from(get_test_path("with_header.bed")).unwrap();
        assert_eq!(rs.len(), 2);
        assert!(rs.header.is_some());
    }

    #[rstest]
    fn test_bad_coordinate_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bed");
        std::fs::write(&path, "chr1\t10\t20\nchr1\tx\t30\n").unwrap();
        let result = RegionSet::try_from(path.as_path());
        assert!(matches!(result, Err(RegionSetError::RegionParseError(_))));
    }

    #[rstest]
    #[case("chr1\t-5\t10\nchr1\t20\t30\n")]
    #[case("chr1\tx\t10\n")]
    #[case("chr1\t5\ty\n")]
    fn test_bad_first_line_is_error(#[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_first.bed");
        std::fs::write(&path, content).unwrap();
        let result = RegionSet::try_from(path.as_path());
        assert!(matches!(result, Err(RegionSetError::RegionParseError(_))));
    }

    #[rstest]
    #[case("chrom\tstart\tend\nchr1\t20\t30\n")]
    #[case("sample peaks\nchr1\t20\t30\n")]
    fn test_first_line_column_header(#[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headed.bed");
        std::fs::write(&path, content).unwrap();
        let rs = RegionSet::try_from(path.as_path()).unwrap();
        assert_eq!(rs.regions.len(), 1);
        assert!(rs.header.is_some());
    }

    #[rstest]
    fn test_write_bed_gz_roundtrip() {
        let rs = RegionSet::try_from(get_test_path("unsorted.bed")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out.bed.gz");
        rs.write_bed(&out).unwrap();

        let back = RegionSet::try_from(out.as_path()).unwrap();
        assert_eq!(back.regions, rs.regions);
    }
}
