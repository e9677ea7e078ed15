//! Cosmological models.
//!
//! Every model is a small value type evaluated pointwise; slice methods are
//! plain elementwise maps over the scalar forms so both paths agree exactly.

pub mod f_igm;
pub mod fiducial;
pub mod hubble;

pub use f_igm::*;
pub use fiducial::*;
pub use hubble::*;
