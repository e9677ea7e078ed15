//! Inputs to the H(z) model.
//!
//! - GP posterior container and the collaborator seam (`gp`)
//! - seeded synthetic posterior from the fiducial model (`synthetic`)

pub mod gp;
pub mod synthetic;

pub use gp::*;
pub use synthetic::*;
