use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

use crate::errors::{RegionSetError, Result};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| RegionSetError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Get a writer for either a gzip'd or plain text file, chosen by the `.gz` extension.
/// Parent directories are created as needed.
///
pub fn get_dynamic_writer(path: &Path) -> Result<Box<dyn Write>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    let writer: Box<dyn Write> = match path.extension() == Some(OsStr::new("gz")) {
        true => Box::new(GzEncoder::new(file, Compression::default())),
        false => Box::new(file),
    };

    Ok(writer)
}

///
/// True when the file at `path` has zero bytes.
///
pub fn file_is_empty(path: &Path) -> Result<bool> {
    Ok(std::fs::metadata(path)?.len() == 0)
}

///
/// Read a `chrom<TAB>length` table, preserving file order.
///
pub fn read_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<Vec<(String, u32)>> {
    let reader = get_dynamic_reader(path.as_ref())?;
    let mut chrom_sizes = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let chr = parts
            .next()
            .ok_or_else(|| RegionSetError::ChromSizesParseError(line.clone()))?;
        let length = parts
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| RegionSetError::ChromSizesParseError(line.clone()))?;

        chrom_sizes.push((chr.to_string(), length));
    }

    Ok(chrom_sizes)
}

/// Extensions dropped from interval file names, matched case-insensitively.
pub const INTERVAL_EXTENSIONS: &[&str] = &[
    "gz", "bgz", "bed", "narrowpeak", "broadpeak", "gappedpeak", "bedgraph", "txt", "tsv",
];

///
/// Sample name of an interval file: the file name with trailing interval
/// extensions removed. Other dots are kept, so ChIP-Atlas ids survive:
/// `peaks.narrowPeak.bed.gz` -> `peaks`, `SRX018625.05.bed` -> `SRX018625.05`.
///
pub fn strip_interval_extensions(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    while let Some((stem, ext)) = name.rsplit_once('.') {
        if stem.is_empty() || !INTERVAL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            break;
        }
        name.truncate(stem.len());
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/assets")
            .join(file_name)
    }

    #[rstest]
    fn test_read_chrom_sizes_keeps_order() {
        let sizes = read_chrom_sizes(get_test_path("hg38.len")).unwrap();
        assert_eq!(sizes[0], ("chr1".to_string(), 248956422));
        assert_eq!(sizes[1].0, "chr2");
    }

    #[rstest]
    #[case("peaks.bed", "peaks")]
    #[case("ENCFF001.bed.gz", "ENCFF001")]
    #[case("peaks.narrowPeak.bed.gz", "peaks")]
    #[case("/tmp/dir/SRX123.05.narrowPeak", "SRX123.05")]
    #[case("SRX018625.10.bed", "SRX018625.10")]
    #[case("sample", "sample")]
    #[case(".bed", ".bed")]
    fn test_strip_interval_extensions(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(strip_interval_extensions(Path::new(path)), expected);
    }

    #[rstest]
    fn test_gz_roundtrip_through_dynamic_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt.gz");
        {
            let mut writer = get_dynamic_writer(&path).unwrap();
            writeln!(writer, "chr1\t10\t20").unwrap();
        }
        let mut line = String::new();
        get_dynamic_reader(&path)
            .unwrap()
            .read_line(&mut line)
            .unwrap();
        assert_eq!(line.trim_end(), "chr1\t10\t20");
    }

    #[rstest]
    fn test_missing_file_is_read_error() {
        let result = get_dynamic_reader(Path::new("does/not/exist.bed"));
        assert!(matches!(result, Err(RegionSetError::FileReadError(_))));
    }
}
