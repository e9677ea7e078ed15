//! Shared configuration types.
//!
//! These are plain, serializable values so an analysis driver can embed them
//! in its own run configuration and reload them later.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Unit-reduction constant folded into the DM_IGM prefactor.
pub const UNIT_CONVERSION: f64 = 1.0504e-42;

/// Physical and cosmological constants of the fiducial flat model.
///
/// Units follow the dispersion-measure convention used throughout the crate:
/// `h_today` in km/s/Mpc, SI for `c`, `m_p` and `g_n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmologyParams {
    /// Baryon density fraction Ω_b.
    pub omega_b: f64,
    /// Speed of light (m/s).
    pub c: f64,
    /// Proton mass (kg).
    pub m_p: f64,
    /// Newtonian gravitational constant (SI).
    pub g_n: f64,
    /// Matter density fraction Ω_m.
    pub omega_m: f64,
    /// Present-day Hubble constant H0.
    pub h_today: f64,
    /// Fiducial IGM baryon fraction.
    pub f_igm_fid: f64,
    /// Fiducial ionization fraction.
    pub xe_fid: f64,
}

impl Default for CosmologyParams {
    fn default() -> Self {
        Self {
            omega_b: 0.0408,
            c: 2.998e8,
            m_p: 1.672e-27,
            g_n: 6.674e-11,
            omega_m: 0.315,
            h_today: 74.03,
            f_igm_fid: 0.83,
            xe_fid: 0.875,
        }
    }
}

/// Environment keys read by [`CosmologyParams::from_env`].
pub const ENV_OMEGA_B: &str = "IGM_OMEGA_B";
pub const ENV_OMEGA_M: &str = "IGM_OMEGA_M";
pub const ENV_H0: &str = "IGM_H0";
pub const ENV_F_IGM_FID: &str = "IGM_F_IGM_FID";
pub const ENV_XE_FID: &str = "IGM_XE_FID";

impl CosmologyParams {
    /// Fiducial constants with optional overrides from the environment (`.env` honoured).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Fiducial constants with overrides taken from `lookup`.
    ///
    /// Keys that are absent keep their fiducial value; keys that are present
    /// must parse to a finite number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut params = Self::default();
        let overrides: [(&str, &mut f64); 5] = [
            (ENV_OMEGA_B, &mut params.omega_b),
            (ENV_OMEGA_M, &mut params.omega_m),
            (ENV_H0, &mut params.h_today),
            (ENV_F_IGM_FID, &mut params.f_igm_fid),
            (ENV_XE_FID, &mut params.xe_fid),
        ];
        for (key, slot) in overrides {
            let Some(raw) = lookup(key) else {
                continue;
            };
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|e| Error::InvalidConfig(format!("{key}={raw:?}: {e}")))?;
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{key}={raw:?} is not finite")));
            }
            *slot = value;
        }
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter sets that make the fiducial model meaningless.
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.omega_b,
            self.c,
            self.m_p,
            self.g_n,
            self.omega_m,
            self.h_today,
            self.f_igm_fid,
            self.xe_fid,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig("cosmology parameters must be finite".into()));
        }
        if !(self.c > 0.0 && self.m_p > 0.0 && self.g_n > 0.0 && self.h_today > 0.0) {
            return Err(Error::InvalidConfig(
                "c, m_p, g_n and h_today must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.omega_m) {
            return Err(Error::InvalidConfig(format!(
                "omega_m={} outside [0, 1]",
                self.omega_m
            )));
        }
        Ok(())
    }
}

/// Tolerances for adaptive quadrature.
///
/// Defaults match SciPy's `quad` (`epsabs = epsrel = 1.49e-8`, `limit = 50`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureConfig {
    pub epsabs: f64,
    pub epsrel: f64,
    /// Maximum number of subintervals.
    pub limit: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 50,
        }
    }
}

impl QuadratureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsabs.is_finite() && self.epsabs >= 0.0) {
            return Err(Error::InvalidConfig(format!("epsabs={} must be >= 0", self.epsabs)));
        }
        if !(self.epsrel.is_finite() && self.epsrel >= 0.0) {
            return Err(Error::InvalidConfig(format!("epsrel={} must be >= 0", self.epsrel)));
        }
        if self.limit == 0 {
            return Err(Error::InvalidConfig("quadrature limit must be >= 1".into()));
        }
        Ok(())
    }
}

/// Settings for generating a synthetic GP posterior from the fiducial model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub z_min: f64,
    pub z_max: f64,
    pub n_points: usize,
    /// Relative 1σ noise applied to the derivative (0 = exact fiducial curve).
    pub noise_rel: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            z_min: 0.0,
            z_max: 1.5,
            n_points: 100,
            noise_rel: 0.0,
            seed: 42,
        }
    }
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.z_min.is_finite() && self.z_max.is_finite() && self.z_min >= 0.0 && self.z_max > self.z_min) {
            return Err(Error::InvalidConfig(format!(
                "invalid redshift range: z_min={}, z_max={} (must be finite, >= 0, and z_max > z_min)",
                self.z_min, self.z_max
            )));
        }
        if self.n_points < 2 {
            return Err(Error::InvalidConfig("n_points must be >= 2".into()));
        }
        if !(self.noise_rel.is_finite() && self.noise_rel >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "noise_rel={} must be finite and >= 0",
                self.noise_rel
            )));
        }
        Ok(())
    }
}
