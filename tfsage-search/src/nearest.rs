use std::io::Write;
use std::path::Path;

use tfsage_core::models::{LabeledMatrix, MetadataTable};
use tfsage_core::utils::get_dynamic_writer;

use crate::errors::{Result, SearchError};
use crate::scoring::ScoringStrategy;

/// One sample ranked by its distance to the query experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbour {
    pub id: String,
    pub distance: f64,
    pub score: f64,
    /// Metadata values, in [`NearestTable::columns`] order.
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearestTable {
    pub columns: Vec<String>,
    pub neighbours: Vec<Neighbour>,
}

impl NearestTable {
    /// `id distance <metadata columns> score`, one row per neighbour.
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = get_dynamic_writer(path.as_ref())?;
        let mut header = vec!["id".to_string(), "distance".to_string()];
        header.extend(self.columns.iter().cloned());
        header.push("score".to_string());
        writeln!(writer, "{}", header.join("\t"))?;

        for n in &self.neighbours {
            let mut fields = vec![n.id.clone(), n.distance.to_string()];
            fields.extend(n.metadata.iter().cloned());
            fields.push(n.score.to_string());
            writeln!(writer, "{}", fields.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }
}

///
/// Rank every sample by distance to `experiment_id` and score it.
///
/// Only samples present in both the distance matrix and the metadata are
/// kept. The query itself is included, at distance zero. Ties keep
/// distance-matrix order.
///
/// # Arguments
/// - experiment_id: a label of the distance matrix
/// - distances: square matrix from [`compute_distances`](crate::compute_distances)
/// - metadata: per-sample annotations joined onto the ranking
/// - strategy: how distances become scores
pub fn find_nearest(
    experiment_id: &str,
    distances: &LabeledMatrix,
    metadata: &MetadataTable,
    strategy: ScoringStrategy,
) -> Result<NearestTable> {
    if distances.row_names != distances.col_names {
        return Err(SearchError::NotSquare {
            rows: distances.n_rows(),
            cols: distances.n_cols(),
        });
    }
    let col = distances
        .col_index(experiment_id)
        .ok_or_else(|| SearchError::UnknownExperiment(experiment_id.to_string()))?;
    let scorer = strategy.scorer(distances)?;

    let index = metadata.index();
    let mut neighbours: Vec<Neighbour> = distances
        .row_names
        .iter()
        .enumerate()
        .filter_map(|(row, id)| {
            let meta = index.get(id.as_str())?;
            let distance = distances.get(row, col);
            Some(Neighbour {
                id: id.clone(),
                distance,
                score: scorer.score(distance),
                metadata: metadata.rows[*meta].clone(),
            })
        })
        .collect();
    neighbours.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    log::info!(
        "Ranked {} of {} samples against {}",
        neighbours.len(),
        distances.n_rows(),
        experiment_id
    );

    Ok(NearestTable {
        columns: metadata.columns.clone(),
        neighbours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[fixture]
    fn distances() -> LabeledMatrix {
        LabeledMatrix::new(
            labels(&["e1", "e2", "e3"]),
            labels(&["e1", "e2", "e3"]),
            vec![0.0, 0.8, 0.2, 0.8, 0.0, 0.5, 0.2, 0.5, 0.0],
        )
        .unwrap()
    }

    #[fixture]
    fn metadata() -> MetadataTable {
        let mut table = MetadataTable::new(labels(&["Factor", "Assay"]));
        table.push("e2", labels(&["CTCF", "ChIP-seq"])).unwrap();
        table.push("e1", labels(&["CTCF", "ATAC-seq"])).unwrap();
        table.push("e3", labels(&["REST", "ChIP-seq"])).unwrap();
        table
    }

    #[rstest]
    fn test_ranked_by_distance(distances: LabeledMatrix, metadata: MetadataTable) {
        let nearest = find_nearest("e1", &distances, &metadata, ScoringStrategy::Unit).unwrap();

        let ids: Vec<&str> = nearest.neighbours.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3", "e2"]);
        assert_eq!(nearest.neighbours[1].metadata, labels(&["REST", "ChIP-seq"]));
        assert_eq!(nearest.neighbours[0].score, 1.0);
        assert!((nearest.neighbours[2].score - (-0.32f64).exp()).abs() < 1e-12);
    }

    #[rstest]
    fn test_inner_join_on_metadata(distances: LabeledMatrix) {
        let mut partial = MetadataTable::new(labels(&["Factor"]));
        partial.push("e2", labels(&["CTCF"])).unwrap();
        partial.push("e9", labels(&["GATA1"])).unwrap();

        let nearest = find_nearest("e1", &distances, &partial, ScoringStrategy::Unit).unwrap();
        assert_eq!(nearest.neighbours.len(), 1);
        assert_eq!(nearest.neighbours[0].id, "e2");
    }

    #[rstest]
    fn test_unknown_experiment(distances: LabeledMatrix, metadata: MetadataTable) {
        assert!(matches!(
            find_nearest("e7", &distances, &metadata, ScoringStrategy::default()),
            Err(SearchError::UnknownExperiment(_))
        ));
    }

    #[rstest]
    fn test_write_tsv(distances: LabeledMatrix, metadata: MetadataTable) {
        let nearest = find_nearest("e2", &distances, &metadata, ScoringStrategy::Unit).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nearest.tsv");
        nearest.write_tsv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id\tdistance\tFactor\tAssay\tscore");
        assert_eq!(lines[1], "e2\t0\tCTCF\tChIP-seq\t1");
        assert_eq!(lines.len(), 4);
    }
}
