use std::io::{BufRead, Write};
use std::path::Path;

use fxhash::FxHashMap;

use crate::errors::{RegionSetError, Result};
use crate::utils::{get_dynamic_reader, get_dynamic_writer};

///
/// Per-sample metadata: a header row, then one row per sample whose first
/// cell is the sample identifier. All values are kept as strings.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    pub columns: Vec<String>,
    pub ids: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MetadataTable {
    pub fn new(columns: Vec<String>) -> Self {
        MetadataTable {
            columns,
            ids: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, id: &str, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(RegionSetError::MatrixParseError(format!(
                "metadata row for {} has {} values, expected {}",
                id,
                row.len(),
                self.columns.len()
            )));
        }
        self.ids.push(id.to_string());
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Map from sample id to row position.
    pub fn index(&self) -> FxHashMap<&str, usize> {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect()
    }

    pub fn value(&self, id: &str, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        let row = self.ids.iter().position(|i| i == id)?;
        Some(self.rows[row][col].as_str())
    }

    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = get_dynamic_reader(path.as_ref())?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Ok(MetadataTable::default()),
        };
        let mut table =
            MetadataTable::new(header.split('\t').skip(1).map(str::to_string).collect());

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let id = fields.next().unwrap_or_default().to_string();
            table.push(&id, fields.map(str::to_string).collect())?;
        }

        Ok(table)
    }

    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        writeln!(writer, "\t{}", self.columns.join("\t"))?;
        for (id, row) in self.ids.iter().zip(&self.rows) {
            writeln!(writer, "{}\t{}", id, row.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_metadata_roundtrip_and_lookup() {
        let mut table = MetadataTable::new(vec!["Assay".to_string(), "Factor".to_string()]);
        table
            .push("ENCFF001", vec!["ChIP-seq".to_string(), "CTCF".to_string()])
            .unwrap();
        table
            .push("SRX002", vec!["ATAC-seq".to_string(), "none".to_string()])
            .unwrap();
        assert!(table.push("bad", vec![]).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.tsv");
        table.write_tsv(&path).unwrap();

        let back = MetadataTable::from_tsv(&path).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.value("SRX002", "Assay"), Some("ATAC-seq"));
        assert_eq!(back.index()["ENCFF001"], 0);
    }
}
