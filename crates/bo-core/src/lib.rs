//! bo-core: shared foundation for the black-oil PVT crates.
//!
//! Contains:
//! - error (failure classification shared by every crate)
//! - numeric (Real, tolerances, the `Evaluation` scalar-or-dual trait)
//! - units (uom SI types, constructors and surface conditions)
//! - phase (phase and component vocabulary of the black-oil model)

pub mod error;
pub mod numeric;
pub mod phase;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult, ErrorClass};
pub use numeric::*;
pub use phase::{Component, Phase};
pub use units::*;
