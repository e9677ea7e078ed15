//! Crate-wide error type.
//!
//! Floating-point hazards (division by a near-zero derivative, extrapolation
//! past the GP grid) are not errors here: they surface as IEEE values. Only
//! conditions a caller can act on are reported.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Adaptive quadrature hit its subdivision limit before meeting tolerance.
    #[error(
        "quadrature over [{lower}, {upper}] did not converge: abs_error={abs_error:e} > tolerance={tolerance:e} after {subdivisions} subdivisions"
    )]
    Quadrature {
        lower: f64,
        upper: f64,
        abs_error: f64,
        tolerance: f64,
        subdivisions: usize,
    },

    #[error("invalid interpolation grid: {0}")]
    InvalidGrid(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The Gaussian-process collaborator failed to produce its outputs.
    #[error("gaussian process source: {0}")]
    Source(String),
}
