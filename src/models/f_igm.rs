//! Redshift parameterizations of the IGM baryon fraction `f_IGM(z)`.
//!
//! - `p2`: `f + α z / (1+z)` (requires `z > -1`)
//! - `p3`: `f + α z e^{-z}`
//! - Linder: `f (1 + s (z - 3))`, anchored at `z = 3`
//!
//! Values are not clamped to `[0, 1]`.

use serde::{Deserialize, Serialize};

pub fn f_igm_p2(z: f64, f_igm: f64, alpha: f64) -> f64 {
    f_igm + alpha * z / (1.0 + z)
}

pub fn f_igm_p3(z: f64, f_igm: f64, alpha: f64) -> f64 {
    f_igm + alpha * z * (-z).exp()
}

pub fn f_igm_linder(z: f64, f_igm: f64, s: f64) -> f64 {
    f_igm * (1.0 + s * (z - 3.0))
}

/// Which `f_IGM(z)` form to use, with its shape parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum FIgmForm {
    /// Redshift-independent `f_IGM`.
    Constant,
    P2 { alpha: f64 },
    P3 { alpha: f64 },
    Linder { s: f64 },
}

impl FIgmForm {
    /// Evaluate the baryon fraction at `z` for base value `f_igm`.
    pub fn eval(self, z: f64, f_igm: f64) -> f64 {
        match self {
            FIgmForm::Constant => f_igm,
            FIgmForm::P2 { alpha } => f_igm_p2(z, f_igm, alpha),
            FIgmForm::P3 { alpha } => f_igm_p3(z, f_igm, alpha),
            FIgmForm::Linder { s } => f_igm_linder(z, f_igm, s),
        }
    }

    pub fn eval_many(self, zs: &[f64], f_igm: f64) -> Vec<f64> {
        zs.iter().map(|&z| self.eval(z, f_igm)).collect()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FIgmForm::Constant => "constant",
            FIgmForm::P2 { .. } => "p2",
            FIgmForm::P3 { .. } => "p3",
            FIgmForm::Linder { .. } => "linder",
        }
    }
}
