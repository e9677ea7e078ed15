//! `igm-hubble` library crate.
//!
//! Theoretical predictions for the Hubble rate `H(z)` and the intergalactic
//! dispersion measure `DM_IGM(z)`:
//!
//! - a fiducial flat cosmology with quadrature-based `DM_IGM(z)` (`models::fiducial`)
//! - baryon-fraction parameterizations `f_IGM(z)` (`models::f_igm`)
//! - four `H(z)` predictors driven by a Gaussian-process derivative of
//!   `DM_IGM(z)` (`models::hubble`)
//!
//! The GP regression is external; its outputs are injected through
//! `data::GaussianProcessSource` or passed in directly.

pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod models;

pub use error::{Error, Result};
