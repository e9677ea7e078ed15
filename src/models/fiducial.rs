//! Fiducial flat cosmology: H(z) and the IGM dispersion measure.
//!
//! - `H(z) = H0 * sqrt(Ωm (1+z)^3 + 1 - Ωm)`
//! - `I(z) = xe * f_IGM * factor * (1+z) / H(z)`
//! - `DM_IGM(z) = ∫_0^z I(z') dz'`
//!
//! `factor` folds the unit reduction and the baryon density prefactor:
//! `1.0504e-42 * 3 c Ωb H0² / (8π G m_p)`.
//!
//! Every DM_IGM value is its own integral from the origin; slices are not
//! accumulated segment by segment.

use std::f64::consts::PI;

use log::debug;
use rayon::prelude::*;

use crate::domain::{CosmologyParams, QuadratureConfig, UNIT_CONVERSION};
use crate::error::Result;
use crate::math::integrate;

/// Reference flat cosmology.
#[derive(Debug, Clone, PartialEq)]
pub struct FiducialModel {
    params: CosmologyParams,
    factor: f64,
}

impl Default for FiducialModel {
    fn default() -> Self {
        Self::new(CosmologyParams::default())
    }
}

impl FiducialModel {
    pub fn new(params: CosmologyParams) -> Self {
        let factor = dm_prefactor(&params);
        debug!(
            "fiducial model: H0={}, Ωm={}, Ωb={}, factor={factor:e}",
            params.h_today, params.omega_m, params.omega_b
        );
        Self { params, factor }
    }

    pub fn params(&self) -> &CosmologyParams {
        &self.params
    }

    /// Precomputed DM prefactor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Flat-model Hubble rate at `z`.
    pub fn h_padrao_at(&self, z: f64) -> f64 {
        let p = &self.params;
        p.h_today * (p.omega_m * (1.0 + z).powi(3) + 1.0 - p.omega_m).sqrt()
    }

    pub fn h_padrao(&self, zs: &[f64]) -> Vec<f64> {
        zs.iter().map(|&z| self.h_padrao_at(z)).collect()
    }

    /// DM_IGM integrand `I(z)`; also the exact `dDM_IGM/dz`.
    ///
    /// Assumes `H(z) != 0`, which holds for `z >= 0`.
    pub fn integrand_at(&self, z: f64) -> f64 {
        let p = &self.params;
        p.xe_fid * p.f_igm_fid * self.factor * (1.0 + z) / self.h_padrao_at(z)
    }

    pub fn integrand(&self, zs: &[f64]) -> Vec<f64> {
        zs.iter().map(|&z| self.integrand_at(z)).collect()
    }

    /// `DM_IGM(z)` with default quadrature tolerances.
    pub fn dm_igm_at(&self, z: f64) -> Result<f64> {
        self.dm_igm_at_with(z, &QuadratureConfig::default())
    }

    pub fn dm_igm_at_with(&self, z: f64, config: &QuadratureConfig) -> Result<f64> {
        let q = integrate(|x| self.integrand_at(x), 0.0, z, config)?;
        Ok(q.value)
    }

    /// `DM_IGM` for each redshift, each integrated independently from 0.
    pub fn dm_igm(&self, zs: &[f64]) -> Result<Vec<f64>> {
        self.dm_igm_with(zs, &QuadratureConfig::default())
    }

    pub fn dm_igm_with(&self, zs: &[f64], config: &QuadratureConfig) -> Result<Vec<f64>> {
        zs.par_iter()
            .map(|&z| self.dm_igm_at_with(z, config))
            .collect()
    }
}

/// `1.0504e-42 * 3 c Ωb H0² / (8π G m_p)`.
pub fn dm_prefactor(p: &CosmologyParams) -> f64 {
    UNIT_CONVERSION * 3.0 * p.c * p.omega_b * p.h_today.powi(2) / (8.0 * PI * p.g_n * p.m_p)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::Error;

    #[test]
    fn factor_matches_closed_form() {
        let model = FiducialModel::default();
        let expected = 1.0504e-42 * 3.0 * 2.998e8 * 0.0408 * 74.03 * 74.03
            / (8.0 * PI * 6.674e-11 * 1.672e-27);
        assert_relative_eq!(model.factor(), expected, max_relative = 1e-14);
        assert_relative_eq!(model.factor(), 75_321.840_42, max_relative = 1e-9);
    }

    #[test]
    fn hubble_today_is_h0() {
        let model = FiducialModel::default();
        assert_relative_eq!(model.h_padrao_at(0.0), 74.03, max_relative = 1e-15);
    }

    #[test]
    fn hubble_is_strictly_increasing() {
        let model = FiducialModel::default();
        let zs: Vec<f64> = (0..=300).map(|i| i as f64 * 0.01).collect();
        let h = model.h_padrao(&zs);
        assert!(h.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn dm_at_origin_is_zero() {
        let model = FiducialModel::default();
        assert_eq!(model.dm_igm_at(0.0).unwrap(), 0.0);
    }

    #[test]
    fn dm_slice_matches_scalar_calls() {
        let model = FiducialModel::default();
        let zs = [0.0, 0.1, 0.5, 1.0, 2.3];
        let dm = model.dm_igm(&zs).unwrap();
        assert_eq!(dm.len(), zs.len());
        for (z, v) in zs.iter().zip(&dm) {
            assert_eq!(*v, model.dm_igm_at(*z).unwrap());
        }
    }

    #[test]
    fn dm_is_increasing_and_matches_trapezoid() {
        let model = FiducialModel::default();
        let z = 1.0;
        let n = 20_000;
        let h = z / n as f64;
        let mut trap = 0.5 * (model.integrand_at(0.0) + model.integrand_at(z));
        for i in 1..n {
            trap += model.integrand_at(i as f64 * h);
        }
        trap *= h;
        assert_relative_eq!(model.dm_igm_at(z).unwrap(), trap, max_relative = 1e-7);

        let dm = model.dm_igm(&[0.2, 0.4, 0.8]).unwrap();
        assert!(dm[0] < dm[1] && dm[1] < dm[2]);
    }

    #[test]
    fn dm_reports_non_convergence() {
        let model = FiducialModel::default();
        let strict = QuadratureConfig {
            epsabs: 0.0,
            epsrel: 0.0,
            limit: 1,
        };
        let err = model.dm_igm_with(&[0.5, 1.0], &strict).unwrap_err();
        assert!(matches!(err, Error::Quadrature { .. }));
    }
}
