//! Error types for solver operations.

use bo_core::ErrorClass;
use thiserror::Error;

/// Errors that can occur while inverting a saturation relation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what} (target {target}, last pressure {last_pressure})")]
    ConvergenceFailed {
        what: &'static str,
        target: f64,
        last_pressure: f64,
    },

    #[error("Vanishing slope for {what} at pressure {pressure}")]
    ZeroSlope { what: &'static str, pressure: f64 },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Both failure modes are numerical; callers may retry or clamp.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Numerical
    }
}
