use std::io::Write;
use std::path::Path;

use tfsage_core::utils::get_dynamic_writer;

use crate::errors::Result;
use crate::intersect::{CoverageInterval, Provenance};

/// One row of a consensus table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusRecord {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    /// Per-input indicator: `0`/`1` as synthesized, `-1`/`1` once aggregated.
    pub indicators: Vec<f64>,
    /// Number of inputs covering the interval.
    pub support_count: usize,
    pub provenance: Option<Provenance>,
    pub support: Option<f64>,
}

impl ConsensusRecord {
    pub fn from_coverage(iv: &CoverageInterval, provenance: Option<Provenance>) -> Self {
        ConsensusRecord {
            chr: iv.chr.clone(),
            start: iv.start,
            end: iv.end,
            indicators: iv
                .covered
                .iter()
                .map(|c| if *c { 1.0 } else { 0.0 })
                .collect(),
            support_count: iv.num(),
            provenance,
            support: None,
        }
    }
}

///
/// Consensus intervals of N input files.
///
/// With provenance there is one row per (merged interval, original peak)
/// pair, so the same interval may repeat on consecutive rows.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsensusTable {
    pub n_inputs: usize,
    pub records: Vec<ConsensusRecord>,
    pub with_provenance: bool,
    pub weights: Option<Vec<f64>>,
}

impl ConsensusTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `file_0 .. file_{N-1}`
    pub fn file_columns(&self) -> Vec<String> {
        (0..self.n_inputs).map(|i| format!("file_{}", i)).collect()
    }

    pub fn header(&self) -> Vec<String> {
        let mut columns = vec!["chrom".to_string(), "start".to_string(), "end".to_string()];
        columns.extend(self.file_columns());
        columns.push("support_count".to_string());
        if self.with_provenance {
            columns.extend(
                ["chrom_original", "start_original", "end_original", "idx", "overlap"]
                    .iter()
                    .map(|c| c.to_string()),
            );
        }
        if self.records.iter().any(|r| r.support.is_some()) {
            columns.push("support".to_string());
        }
        if let Some(weights) = &self.weights {
            columns.extend((0..weights.len()).map(|i| format!("weight_{}", i)));
        }
        columns
    }

    /// Write as a headed TSV, gzipped when the path ends in `.gz`.
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let with_support = self.records.iter().any(|r| r.support.is_some());
        writeln!(writer, "{}", self.header().join("\t"))?;

        for record in &self.records {
            let mut fields = vec![
                record.chr.clone(),
                record.start.to_string(),
                record.end.to_string(),
            ];
            fields.extend(record.indicators.iter().map(|v| v.to_string()));
            fields.push(record.support_count.to_string());

            if self.with_provenance {
                match &record.provenance {
                    Some(p) => fields.extend([
                        p.chr.clone(),
                        p.start.to_string(),
                        p.end.to_string(),
                        p.idx.to_string(),
                        p.overlap.to_string(),
                    ]),
                    None => fields.extend(std::iter::repeat_n(".".to_string(), 5)),
                }
            }
            if with_support {
                fields.push(
                    record
                        .support
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| ".".to_string()),
                );
            }
            if let Some(weights) = &self.weights {
                fields.extend(weights.iter().map(|w| w.to_string()));
            }

            writeln!(writer, "{}", fields.join("\t"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_tsv_layout() {
        let iv = CoverageInterval {
            chr: "chr1".to_string(),
            start: 100,
            end: 250,
            covered: vec![true, false],
        };
        let mut record = ConsensusRecord::from_coverage(
            &iv,
            Some(Provenance {
                chr: "chr1".to_string(),
                start: 100,
                end: 200,
                idx: 0,
                overlap: 100,
            }),
        );
        record.indicators = vec![1.0, -1.0];
        record.support = Some(0.5);

        let table = ConsensusTable {
            n_inputs: 2,
            records: vec![record],
            with_provenance: true,
            weights: Some(vec![1.0, 0.5]),
        };

        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "chrom\tstart\tend\tfile_0\tfile_1\tsupport_count\tchrom_original\tstart_original\tend_original\tidx\toverlap\tsupport\tweight_0\tweight_1"
        );
        assert_eq!(lines[1], "chr1\t100\t250\t1\t-1\t1\tchr1\t100\t200\t0\t100\t0.5\t1\t0.5");
    }
}
