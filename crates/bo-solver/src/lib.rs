//! Saturation-pressure solver for black-oil PVT tables.
//!
//! Saturated mass fractions are tabulated as functions of pressure. Inverting
//! them (which pressure saturates a phase holding a given dissolved mass
//! fraction?) is done with a Newton iteration seeded by a cheap spline guess.

pub mod error;
pub mod newton;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, solve_saturation_pressure};
