//! Pairwise distances between the rows of an embedding matrix.

use std::fmt::{self, Display};
use std::str::FromStr;

use rayon::prelude::*;
use tfsage_core::models::LabeledMatrix;

use crate::errors::{Result, SearchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// `1 - pearson(u, v)`
    #[default]
    Correlation,
    /// `1 - cos(u, v)`
    Cosine,
    Euclidean,
}

impl FromStr for DistanceMetric {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "correlation" => Ok(DistanceMetric::Correlation),
            "cosine" => Ok(DistanceMetric::Cosine),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            _ => Err(SearchError::UnknownMetric(s.to_string())),
        }
    }
}

impl Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DistanceMetric::Correlation => "correlation",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
        };
        write!(f, "{}", name)
    }
}

fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v).map(|(a, b)| a * b).sum()
}

fn centered(u: &[f64]) -> Vec<f64> {
    let mean = u.iter().sum::<f64>() / u.len().max(1) as f64;
    u.iter().map(|x| x - mean).collect()
}

// 1 - cosine similarity; a zero vector is at distance 1 from everything
fn cosine_distance(u: &[f64], v: &[f64]) -> f64 {
    let norms = dot(u, u).sqrt() * dot(v, v).sqrt();
    if norms == 0.0 {
        return 1.0;
    }
    (1.0 - dot(u, v) / norms).max(0.0)
}

impl DistanceMetric {
    pub fn distance(&self, u: &[f64], v: &[f64]) -> f64 {
        match self {
            DistanceMetric::Correlation => cosine_distance(&centered(u), &centered(v)),
            DistanceMetric::Cosine => cosine_distance(u, v),
            DistanceMetric::Euclidean => u
                .iter()
                .zip(v)
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt(),
        }
    }
}

///
/// Distance between every pair of rows of `embeddings`.
///
/// The result is square and symmetric, labelled on both axes by the
/// embedding row names, with zeros on the diagonal.
///
pub fn compute_distances(embeddings: &LabeledMatrix, metric: DistanceMetric) -> Result<LabeledMatrix> {
    let n = embeddings.n_rows();
    log::debug!("Computing {} x {} {} distances", n, n, metric);

    let values: Vec<f64> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            (0..n).map(move |j| match i == j {
                true => 0.0,
                false => metric.distance(embeddings.row(i), embeddings.row(j)),
            })
        })
        .collect();

    Ok(LabeledMatrix::new(
        embeddings.row_names.clone(),
        embeddings.row_names.clone(),
        values,
    )?)
}
