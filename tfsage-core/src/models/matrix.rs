use std::io::{BufRead, Write};
use std::path::Path;

use crate::errors::{RegionSetError, Result};
use crate::utils::{get_dynamic_reader, get_dynamic_writer};

/// A dense `f64` matrix with named rows and columns.
///
/// Values are stored as a flat row-major array: row `i`, column `j` is
/// `values[i * n_cols + j]`. Used for RP matrices (genes × samples),
/// embeddings (samples × dimensions) and distance tables (samples × samples).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    pub row_names: Vec<String>,
    pub col_names: Vec<String>,
    pub values: Vec<f64>,
}

impl LabeledMatrix {
    pub fn new(row_names: Vec<String>, col_names: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if values.len() != row_names.len() * col_names.len() {
            return Err(RegionSetError::MatrixParseError(format!(
                "expected {} x {} values, got {}",
                row_names.len(),
                col_names.len(),
                values.len()
            )));
        }
        Ok(LabeledMatrix {
            row_names,
            col_names,
            values,
        })
    }

    /// Build from column vectors; each column must have one value per row.
    pub fn from_columns(
        row_names: Vec<String>,
        col_names: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n_rows = row_names.len();
        if columns.len() != col_names.len() {
            return Err(RegionSetError::MatrixParseError(format!(
                "{} column names for {} columns",
                col_names.len(),
                columns.len()
            )));
        }
        if let Some(bad) = columns.iter().position(|c| c.len() != n_rows) {
            return Err(RegionSetError::MatrixParseError(format!(
                "column {} has {} values, expected {}",
                bad,
                columns[bad].len(),
                n_rows
            )));
        }

        let n_cols = columns.len();
        let mut values = vec![0.0; n_rows * n_cols];
        for (j, column) in columns.iter().enumerate() {
            for (i, v) in column.iter().enumerate() {
                values[i * n_cols + j] = *v;
            }
        }

        LabeledMatrix::new(row_names, col_names, values)
    }

    pub fn n_rows(&self) -> usize {
        self.row_names.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_names.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n_cols() + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.n_cols();
        &self.values[row * n..(row + 1) * n]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.n_rows()).map(|i| self.get(i, col)).collect()
    }

    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.row_names.iter().position(|r| r == name)
    }

    pub fn col_index(&self, name: &str) -> Option<usize> {
        self.col_names.iter().position(|c| c == name)
    }

    ///
    /// Write as TSV: a header of column names (first cell empty), then one
    /// line per row starting with the row name.
    ///
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "\t{}", self.col_names.join("\t"))?;
        for (i, name) in self.row_names.iter().enumerate() {
            let row: Vec<String> = self.row(i).iter().map(|v| v.to_string()).collect();
            writeln!(writer, "{}\t{}", name, row.join("\t"))?;
        }
        Ok(())
    }

    ///
    /// Read the TSV layout produced by [LabeledMatrix::write_tsv].
    ///
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = get_dynamic_reader(path.as_ref())?;
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return LabeledMatrix::new(vec![], vec![], vec![]),
        };
        let col_names: Vec<String> = header.split('\t').skip(1).map(str::to_string).collect();

        let mut row_names = Vec::new();
        let mut values = Vec::new();
        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default();
            let row = fields
                .map(|v| {
                    v.parse::<f64>()
                        .map_err(|_| RegionSetError::MatrixParseError(line.clone()))
                })
                .collect::<Result<Vec<f64>>>()?;
            if row.len() != col_names.len() {
                return Err(RegionSetError::MatrixParseError(line.clone()));
            }
            row_names.push(name.to_string());
            values.extend(row);
        }

        LabeledMatrix::new(row_names, col_names, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[rstest]
    fn test_from_columns_is_row_major() {
        let m = LabeledMatrix::from_columns(
            names("g", 2),
            names("s", 3),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(m.values, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
        assert_eq!(m.column(1), vec![3.0, 4.0]);
        assert_eq!(m.row(1), &[2.0, 4.0, 6.0]);
    }

    #[rstest]
    fn test_shape_mismatch() {
        assert!(LabeledMatrix::new(names("g", 2), names("s", 2), vec![1.0]).is_err());
        assert!(
            LabeledMatrix::from_columns(names("g", 2), names("s", 1), vec![vec![1.0]]).is_err()
        );
    }

    #[rstest]
    fn test_tsv_roundtrip() {
        let m = LabeledMatrix::new(names("g", 2), names("s", 2), vec![0.5, 0.0, 1.25, 3.0]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.tsv");
        m.write_tsv(&path).unwrap();
        assert_eq!(LabeledMatrix::from_tsv(&path).unwrap(), m);
    }
}
