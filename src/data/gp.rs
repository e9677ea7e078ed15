//! Gaussian-process outputs consumed by the H(z) model.
//!
//! The regression itself lives outside this crate. It hands over four
//! posterior arrays evaluated on a prediction grid; GP tooling usually emits
//! them as `n × 1` columns, so they are carried as matrices and flattened in
//! row-major order when used.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Posterior of DM_IGM(z) and of its derivative over the prediction grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GpPosterior {
    pub mean: DMatrix<f64>,
    pub variance: DMatrix<f64>,
    pub mean_deriv: DMatrix<f64>,
    pub deriv_variance: DMatrix<f64>,
}

impl GpPosterior {
    /// Build from flat per-point values (stored as `n × 1` columns).
    pub fn from_columns(mean: &[f64], variance: &[f64], mean_deriv: &[f64], deriv_variance: &[f64]) -> Result<Self> {
        let n = mean.len();
        if [variance.len(), mean_deriv.len(), deriv_variance.len()]
            .iter()
            .any(|&len| len != n)
        {
            return Err(Error::Source(format!(
                "posterior arrays differ in length: mean={n}, variance={}, mean_deriv={}, deriv_variance={}",
                variance.len(),
                mean_deriv.len(),
                deriv_variance.len()
            )));
        }
        Ok(Self {
            mean: column(mean),
            variance: column(variance),
            mean_deriv: column(mean_deriv),
            deriv_variance: column(deriv_variance),
        })
    }

    pub fn mean_deriv_flat(&self) -> Vec<f64> {
        flatten(&self.mean_deriv)
    }
}

/// The two entry points of the external GP collaborator.
pub trait GaussianProcessSource {
    /// Posterior mean, variance, mean derivative and derivative variance.
    fn posterior(&self) -> Result<GpPosterior>;

    /// Prediction grid the posterior is evaluated on.
    fn z_pred(&self) -> Result<DMatrix<f64>>;
}

/// A posterior captured together with its grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GpSnapshot {
    pub posterior: GpPosterior,
    pub z_pred: DMatrix<f64>,
}

impl GpSnapshot {
    pub fn new(posterior: GpPosterior, z_pred: DMatrix<f64>) -> Result<Self> {
        let n_grid = z_pred.len();
        let n_deriv = posterior.mean_deriv.len();
        if n_grid != n_deriv {
            return Err(Error::Source(format!(
                "grid has {n_grid} points but mean derivative has {n_deriv}"
            )));
        }
        Ok(Self { posterior, z_pred })
    }

    pub fn z_pred_flat(&self) -> Vec<f64> {
        flatten(&self.z_pred)
    }
}

impl GaussianProcessSource for GpSnapshot {
    fn posterior(&self) -> Result<GpPosterior> {
        Ok(self.posterior.clone())
    }

    fn z_pred(&self) -> Result<DMatrix<f64>> {
        Ok(self.z_pred.clone())
    }
}

/// Row-major flatten (NumPy's `flatten` order).
pub fn flatten(m: &DMatrix<f64>) -> Vec<f64> {
    m.transpose().iter().copied().collect()
}

/// `n × 1` column from a slice.
pub fn column(values: &[f64]) -> DMatrix<f64> {
    DMatrix::from_column_slice(values.len(), 1, values)
}
