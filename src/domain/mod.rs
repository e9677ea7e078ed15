//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the fiducial constants (`CosmologyParams`)
//! - numerical settings (`QuadratureConfig`, `SyntheticConfig`)

pub mod types;

pub use types::*;
