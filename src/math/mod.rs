//! Mathematical utilities: adaptive quadrature and linear interpolation.

pub mod interp;
pub mod quadrature;

pub use interp::*;
pub use quadrature::*;
