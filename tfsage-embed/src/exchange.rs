//! Parquet files exchanged with the embedding script.
//!
//! Tables are laid out the way pandas writes a frame with an unnamed index:
//! one column per data column, followed by the row labels in
//! `__index_level_0__`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use tfsage_core::models::{LabeledMatrix, MetadataTable};

use crate::errors::{EmbeddingError, Result};

pub const INDEX_COLUMN: &str = "__index_level_0__";

fn write_batch(path: &Path, fields: Vec<Field>, columns: Vec<ArrayRef>) -> Result<()> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

///
/// Write a matrix with one `Float64` column per matrix column and the row
/// names as the index.
///
pub fn write_matrix(matrix: &LabeledMatrix, path: &Path) -> Result<()> {
    let mut fields: Vec<Field> = matrix
        .col_names
        .iter()
        .map(|name| Field::new(name, DataType::Float64, false))
        .collect();
    let mut columns: Vec<ArrayRef> = (0..matrix.n_cols())
        .map(|j| Arc::new(Float64Array::from(matrix.column(j))) as ArrayRef)
        .collect();

    fields.push(Field::new(INDEX_COLUMN, DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from(matrix.row_names.clone())));

    write_batch(path, fields, columns)
}

///
/// Write a metadata table as string columns, indexed by sample id.
///
pub fn write_metadata(metadata: &MetadataTable, path: &Path) -> Result<()> {
    let mut fields: Vec<Field> = metadata
        .columns
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let mut columns: Vec<ArrayRef> = (0..metadata.columns.len())
        .map(|j| {
            let values: Vec<Option<&str>> = metadata
                .rows
                .iter()
                .map(|row| row.get(j).map(String::as_str))
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    fields.push(Field::new(INDEX_COLUMN, DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from(metadata.ids.clone())));

    write_batch(path, fields, columns)
}

///
/// Read a numeric table labelled by its `__index_level_0__` column, such as
/// the embeddings written by the script. Every other column is cast to
/// `f64`; nulls become `NaN`.
///
pub fn read_matrix(path: &Path) -> Result<LabeledMatrix> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    let index = schema
        .index_of(INDEX_COLUMN)
        .map_err(|_| EmbeddingError::MissingIndexColumn(path.to_path_buf()))?;
    let value_columns: Vec<usize> = (0..schema.fields().len())
        .filter(|i| *i != index)
        .collect();
    let col_names: Vec<String> = value_columns
        .iter()
        .map(|i| schema.field(*i).name().clone())
        .collect();

    let mut row_names = Vec::new();
    let mut values = Vec::new();

    for batch in builder.build()? {
        let batch = batch?;

        let labels = cast(batch.column(index).as_ref(), &DataType::Utf8)?;
        let labels = labels
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| EmbeddingError::InvalidOutput(format!("{} is not text", INDEX_COLUMN)))?;

        let dims = value_columns
            .iter()
            .map(|i| cast(batch.column(*i).as_ref(), &DataType::Float64))
            .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;
        let dims = dims
            .iter()
            .zip(&col_names)
            .map(|(c, name)| {
                c.as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| EmbeddingError::InvalidOutput(format!("{} is not numeric", name)))
            })
            .collect::<Result<Vec<&Float64Array>>>()?;

        for row in 0..batch.num_rows() {
            row_names.push(labels.value(row).to_string());
            values.extend(dims.iter().map(|c| match c.is_null(row) {
                true => f64::NAN,
                false => c.value(row),
            }));
        }
    }

    Ok(LabeledMatrix::new(row_names, col_names, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn field_names(path: &Path) -> Vec<String> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap()).unwrap();
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    #[fixture]
    fn rp_matrix() -> LabeledMatrix {
        LabeledMatrix::new(
            vec!["GENE_A".to_string(), "GENE_B".to_string(), "GENE_C".to_string()],
            vec!["SRX018625.05".to_string(), "ENCFF001".to_string()],
            vec![1.0, 0.5, 0.0, 2.0, 0.25, 0.0],
        )
        .unwrap()
    }

    #[rstest]
    fn test_matrix_has_pandas_index_column(rp_matrix: LabeledMatrix) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rp_matrix.parquet");
        write_matrix(&rp_matrix, &path).unwrap();

        assert_eq!(
            field_names(&path),
            vec!["SRX018625.05", "ENCFF001", INDEX_COLUMN]
        );
        assert_eq!(read_matrix(&path).unwrap(), rp_matrix);
    }

    #[rstest]
    fn test_metadata_columns() {
        let mut metadata = MetadataTable::new(vec!["Assay".to_string(), "Factor".to_string()]);
        metadata
            .push("s1", vec!["ChIP-seq".to_string(), "CTCF".to_string()])
            .unwrap();
        metadata
            .push("s2", vec!["ATAC-seq".to_string(), "".to_string()])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.parquet");
        write_metadata(&metadata, &path).unwrap();

        assert_eq!(field_names(&path), vec!["Assay", "Factor", INDEX_COLUMN]);

        let batch = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
            .unwrap()
            .build()
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        let ids = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ids.value(1), "s2");
    }

    #[rstest]
    fn test_integer_dimensions_are_cast() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.parquet");
        write_batch(
            &path,
            vec![
                Field::new(INDEX_COLUMN, DataType::Utf8, false),
                Field::new("PC_1", DataType::Int32, true),
            ],
            vec![
                Arc::new(StringArray::from(vec!["s1", "s2"])),
                Arc::new(arrow::array::Int32Array::from(vec![Some(3), None])),
            ],
        )
        .unwrap();

        let embeddings = read_matrix(&path).unwrap();
        assert_eq!(embeddings.row_names, vec!["s1", "s2"]);
        assert_eq!(embeddings.col_names, vec!["PC_1"]);
        assert_eq!(embeddings.get(0, 0), 3.0);
        assert!(embeddings.get(1, 0).is_nan());
    }

    #[rstest]
    fn test_missing_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_index.parquet");
        write_batch(
            &path,
            vec![Field::new("PC_1", DataType::Float64, false)],
            vec![Arc::new(Float64Array::from(vec![1.0]))],
        )
        .unwrap();

        assert!(matches!(
            read_matrix(&path),
            Err(EmbeddingError::MissingIndexColumn(_))
        ));
    }
}
