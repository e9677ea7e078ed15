//! Synthetic GP posterior generated from the fiducial model.
//!
//! The mean is the fiducial `DM_IGM(z)` and the mean derivative is its exact
//! derivative `I(z)`, optionally perturbed by seeded relative Gaussian noise.
//! Reported variances are `(noise_rel * value)^2`.

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::gp::{GpPosterior, GpSnapshot, column};
use crate::domain::SyntheticConfig;
use crate::error::{Error, Result};
use crate::models::FiducialModel;

/// Evenly spaced `n` points on `[min, max]` (inclusive).
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![min];
    }
    let step = (max - min) / (n as f64 - 1.0);
    (0..n)
        .map(|i| if i + 1 == n { max } else { min + step * i as f64 })
        .collect()
}

pub fn synthetic_posterior(model: &FiducialModel, config: &SyntheticConfig) -> Result<GpSnapshot> {
    config.validate()?;

    let grid = linspace(config.z_min, config.z_max, config.n_points);
    let mean = model.dm_igm(&grid)?;
    let exact_deriv = model.integrand(&grid);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::InvalidConfig(format!("noise distribution error: {e}")))?;

    let mut mean_deriv = Vec::with_capacity(grid.len());
    for &d in &exact_deriv {
        let eps: f64 = normal.sample(&mut rng);
        mean_deriv.push(d * (1.0 + config.noise_rel * eps));
    }

    let variance: Vec<f64> = mean.iter().map(|m| (config.noise_rel * m).powi(2)).collect();
    let deriv_variance: Vec<f64> = exact_deriv
        .iter()
        .map(|d| (config.noise_rel * d).powi(2))
        .collect();

    debug!(
        "synthetic posterior: {} points on [{}, {}], noise_rel={}, seed={}",
        grid.len(),
        config.z_min,
        config.z_max,
        config.noise_rel,
        config.seed
    );

    let posterior = GpPosterior::from_columns(&mean, &variance, &mean_deriv, &deriv_variance)?;
    GpSnapshot::new(posterior, column(&grid))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::gp::flatten;

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(0.0, 1.5, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[6], 1.5);
        assert_relative_eq!(v[2], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn noiseless_posterior_is_exact_derivative() {
        let model = FiducialModel::default();
        let cfg = SyntheticConfig {
            n_points: 11,
            ..Default::default()
        };
        let snap = synthetic_posterior(&model, &cfg).unwrap();
        let z = snap.z_pred_flat();
        assert_eq!(snap.posterior.mean_deriv_flat(), model.integrand(&z));
        assert!(flatten(&snap.posterior.deriv_variance).iter().all(|&v| v == 0.0));
        assert_eq!(flatten(&snap.posterior.mean)[0], 0.0);
    }

    #[test]
    fn noise_is_seeded() {
        let model = FiducialModel::default();
        let cfg = SyntheticConfig {
            n_points: 20,
            noise_rel: 0.05,
            seed: 7,
            ..Default::default()
        };
        let a = synthetic_posterior(&model, &cfg).unwrap();
        let b = synthetic_posterior(&model, &cfg).unwrap();
        assert_eq!(a, b);

        let other = synthetic_posterior(&model, &SyntheticConfig { seed: 8, ..cfg }).unwrap();
        assert_ne!(a.posterior.mean_deriv, other.posterior.mean_deriv);
    }

    #[test]
    fn rejects_single_point_grid() {
        let model = FiducialModel::default();
        let cfg = SyntheticConfig {
            n_points: 1,
            ..Default::default()
        };
        assert!(matches!(
            synthetic_posterior(&model, &cfg),
            Err(Error::InvalidConfig(_))
        ));
    }
}
