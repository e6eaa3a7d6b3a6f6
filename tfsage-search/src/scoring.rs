use tfsage_core::models::LabeledMatrix;

use crate::errors::{Result, SearchError};

///
/// How a distance turns into a similarity score in `(0, 1]`.
///
/// The Gaussian variants score `exp(-d² / (2σ²))`.
///
#[derive(Debug, Clone, Copy, Default)]
pub enum ScoringStrategy {
    Gaussian { sigma_sq: f64 },
    /// Gaussian with σ² set to the variance of all pairwise distances.
    #[default]
    EstimateFromData,
    /// Gaussian with σ² = 1.
    Unit,
    Custom(fn(f64) -> f64),
}

/// A scoring strategy with its parameters fixed.
#[derive(Debug, Clone, Copy)]
pub enum Scorer {
    Gaussian { sigma_sq: f64 },
    Custom(fn(f64) -> f64),
}

impl Scorer {
    pub fn score(&self, distance: f64) -> f64 {
        match self {
            Scorer::Gaussian { sigma_sq } => (-distance.powi(2) / (2.0 * sigma_sq)).exp(),
            Scorer::Custom(f) => f(distance),
        }
    }
}

/// Population variance of every entry of the distance matrix.
pub fn estimate_sigma_sq(distances: &LabeledMatrix) -> f64 {
    let n = distances.values.len();
    if n == 0 {
        return 0.0;
    }
    let mean = distances.values.iter().sum::<f64>() / n as f64;
    distances
        .values
        .iter()
        .map(|d| (d - mean).powi(2))
        .sum::<f64>()
        / n as f64
}

fn checked_gaussian(sigma_sq: f64) -> Result<Scorer> {
    if !(sigma_sq.is_finite() && sigma_sq > 0.0) {
        return Err(SearchError::InvalidSigma(sigma_sq));
    }
    Ok(Scorer::Gaussian { sigma_sq })
}

impl ScoringStrategy {
    /// Fix the strategy's parameters, estimating them from `distances` if needed.
    pub fn scorer(&self, distances: &LabeledMatrix) -> Result<Scorer> {
        match self {
            ScoringStrategy::Gaussian { sigma_sq } => checked_gaussian(*sigma_sq),
            ScoringStrategy::EstimateFromData => {
                let sigma_sq = estimate_sigma_sq(distances);
                log::debug!("Estimated sigma^2 = {} from the distance matrix", sigma_sq);
                checked_gaussian(sigma_sq)
            }
            ScoringStrategy::Unit => checked_gaussian(1.0),
            ScoringStrategy::Custom(f) => Ok(Scorer::Custom(*f)),
        }
    }
}
