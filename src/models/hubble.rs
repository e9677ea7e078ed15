//! H(z) predictors obtained by inverting the DM_IGM relation.
//!
//! Given a GP estimate of `dDM_IGM/dz`, the Hubble rate follows from the
//! integrand definition:
//!
//! ```text
//! H(z) = factor * (1+z) * f_IGM(z) * xe / (dDM_IGM/dz)
//! ```
//!
//! The derivative curve is a [`LinearInterpolant`] built once at construction
//! and reused by every predictor. Queries outside the GP grid extrapolate
//! linearly without any bound check, and a near-zero interpolated derivative
//! is not guarded.

use log::debug;

use crate::data::gp::{GaussianProcessSource, GpSnapshot, flatten};
use crate::error::Result;
use crate::math::LinearInterpolant;
use crate::models::f_igm::FIgmForm;
use crate::models::fiducial::FiducialModel;

/// Ionization fraction used by all four predictors.
///
/// Numerically equal to the fiducial `xe_fid` but fixed here; changing
/// `CosmologyParams::xe_fid` does not affect these predictors.
// TODO: decide whether the predictors should follow `CosmologyParams::xe_fid`.
pub const XE_LITERAL: f64 = 0.875;

/// GP-driven Hubble-rate model.
#[derive(Debug, Clone, PartialEq)]
pub struct HModel {
    factor: f64,
    mean_deriv: LinearInterpolant,
}

impl HModel {
    /// Build from a prediction grid and the paired mean derivative.
    pub fn new(factor: f64, z_grid: &[f64], mean_deriv: &[f64]) -> Result<Self> {
        let mean_deriv = LinearInterpolant::new(z_grid, mean_deriv)?;
        let x = mean_deriv.x();
        debug!(
            "H model: factor={factor:e}, {} grid points on [{}, {}]",
            x.len(),
            x[0],
            x[x.len() - 1]
        );
        Ok(Self { factor, mean_deriv })
    }

    pub fn from_snapshot(factor: f64, snapshot: &GpSnapshot) -> Result<Self> {
        Self::new(factor, &snapshot.z_pred_flat(), &snapshot.posterior.mean_deriv_flat())
    }

    /// Query the GP collaborator once and keep only the mean derivative and grid.
    pub fn from_source<S>(fiducial: &FiducialModel, source: &S) -> Result<Self>
    where
        S: GaussianProcessSource + ?Sized,
    {
        let posterior = source.posterior()?;
        let z_pred = source.z_pred()?;
        Self::new(fiducial.factor(), &flatten(&z_pred), &posterior.mean_deriv_flat())
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Interpolated `dDM_IGM/dz` at `z`.
    pub fn mean_deriv_at(&self, z: f64) -> f64 {
        self.mean_deriv.value(z)
    }

    /// H(z) for the given baryon-fraction form.
    pub fn predict_at(&self, form: FIgmForm, z: f64, f_igm: f64) -> f64 {
        let f = form.eval(z, f_igm);
        self.factor * (1.0 + z) * f * XE_LITERAL / self.mean_deriv_at(z)
    }

    pub fn predict(&self, form: FIgmForm, zs: &[f64], f_igm: f64) -> Vec<f64> {
        zs.iter().map(|&z| self.predict_at(form, z, f_igm)).collect()
    }

    /// Constant `f_IGM`.
    pub fn h_p1_at(&self, z: f64, f_igm: f64) -> f64 {
        self.predict_at(FIgmForm::Constant, z, f_igm)
    }

    pub fn h_p1(&self, zs: &[f64], f_igm: f64) -> Vec<f64> {
        self.predict(FIgmForm::Constant, zs, f_igm)
    }

    /// `f_IGM(z) = f + α z / (1+z)`.
    pub fn h_p2_at(&self, z: f64, f_igm: f64, alpha: f64) -> f64 {
        self.predict_at(FIgmForm::P2 { alpha }, z, f_igm)
    }

    pub fn h_p2(&self, zs: &[f64], f_igm: f64, alpha: f64) -> Vec<f64> {
        self.predict(FIgmForm::P2 { alpha }, zs, f_igm)
    }

    /// `f_IGM(z) = f + α z e^{-z}`.
    pub fn h_p3_at(&self, z: f64, f_igm: f64, alpha: f64) -> f64 {
        self.predict_at(FIgmForm::P3 { alpha }, z, f_igm)
    }

    pub fn h_p3(&self, zs: &[f64], f_igm: f64, alpha: f64) -> Vec<f64> {
        self.predict(FIgmForm::P3 { alpha }, zs, f_igm)
    }

    /// Linder form `f_IGM(z) = f (1 + s (z - 3))`.
    pub fn h_p4_at(&self, z: f64, f_igm: f64, s: f64) -> f64 {
        self.predict_at(FIgmForm::Linder { s }, z, f_igm)
    }

    pub fn h_p4(&self, zs: &[f64], f_igm: f64, s: f64) -> Vec<f64> {
        self.predict(FIgmForm::Linder { s }, zs, f_igm)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::gp::{GpPosterior, column};
    use crate::error::Error;
    use crate::models::f_igm::{f_igm_linder, f_igm_p2, f_igm_p3};

    fn toy_model() -> HModel {
        // dDM/dz rising linearly from 700 to 1000 over z in [0, 1.5].
        let z: Vec<f64> = (0..=15).map(|i| i as f64 * 0.1).collect();
        let d: Vec<f64> = z.iter().map(|z| 700.0 + 200.0 * z).collect();
        HModel::new(75_000.0, &z, &d).unwrap()
    }

    #[test]
    fn interpolant_reproduces_grid() {
        let z = [0.0, 0.4, 0.9, 1.3];
        let d = [810.0, 790.0, 700.0, 655.5];
        let model = HModel::new(1.0, &z, &d).unwrap();
        for (zi, di) in z.iter().zip(d) {
            assert_relative_eq!(model.mean_deriv_at(*zi), di, epsilon = 1e-12);
        }
        // Beyond the grid: line through (0.9, 700) and (1.3, 655.5).
        let slope = (655.5 - 700.0) / 0.4;
        assert_relative_eq!(model.mean_deriv_at(3.0), 655.5 + slope * 1.7, max_relative = 1e-12);
    }

    #[test]
    fn p1_formula() {
        let model = toy_model();
        let z = 0.5;
        let expected = 75_000.0 * 1.5 * 0.83 * 0.875 / 800.0;
        assert_relative_eq!(model.h_p1_at(z, 0.83), expected, max_relative = 1e-12);
    }

    #[test]
    fn p2_with_zero_alpha_equals_p1() {
        let model = toy_model();
        for &z in &[0.05, 0.7, 1.2] {
            assert_eq!(model.h_p2_at(z, 0.83, 0.0), model.h_p1_at(z, 0.83));
        }
    }

    #[test]
    fn predictors_scale_with_their_f_igm() {
        let model = toy_model();
        let z = 0.8;
        let base = model.h_p1_at(z, 1.0);
        assert_relative_eq!(model.h_p2_at(z, 0.8, 0.1), base * f_igm_p2(z, 0.8, 0.1), max_relative = 1e-13);
        assert_relative_eq!(model.h_p3_at(z, 0.8, 0.1), base * f_igm_p3(z, 0.8, 0.1), max_relative = 1e-13);
        assert_relative_eq!(model.h_p4_at(z, 0.8, 0.1), base * f_igm_linder(z, 0.8, 0.1), max_relative = 1e-13);
    }

    #[test]
    fn slice_paths_match_scalar_paths() {
        let model = toy_model();
        let zs = [0.0, 0.25, 1.0, 2.0];
        let p3 = model.h_p3(&zs, 0.83, 0.3);
        let p4 = model.h_p4(&zs, 0.83, -0.05);
        for (i, &z) in zs.iter().enumerate() {
            assert_eq!(p3[i], model.h_p3_at(z, 0.83, 0.3));
            assert_eq!(p4[i], model.h_p4_at(z, 0.83, -0.05));
        }
        assert_eq!(model.h_p1(&zs, 0.83).len(), zs.len());
        assert_eq!(model.h_p2(&zs, 0.83, 0.1).len(), zs.len());
    }

    #[test]
    fn xe_literal_is_fixed() {
        let fid = FiducialModel::new(crate::domain::CosmologyParams {
            xe_fid: 1.0,
            ..Default::default()
        });
        let model = HModel::new(fid.factor(), &[0.0, 1.0], &[1.0, 1.0]).unwrap();
        assert_relative_eq!(model.h_p1_at(0.0, 1.0), fid.factor() * 0.875, max_relative = 1e-15);
    }

    struct FailingSource;

    impl GaussianProcessSource for FailingSource {
        fn posterior(&self) -> Result<GpPosterior> {
            Err(Error::Source("regression unavailable".into()))
        }

        fn z_pred(&self) -> Result<nalgebra::DMatrix<f64>> {
            Ok(column(&[0.0, 1.0]))
        }
    }

    #[test]
    fn source_errors_propagate() {
        let err = HModel::from_source(&FiducialModel::default(), &FailingSource).unwrap_err();
        assert_eq!(err, Error::Source("regression unavailable".into()));
    }
}
