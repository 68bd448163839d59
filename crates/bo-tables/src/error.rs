//! Table construction and lookup errors.

use bo_core::{CoreError, ErrorClass};
use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building or evaluating tabulated functions.
///
/// All of them denote invalid input data or a caller defect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A table needs at least two samples to interpolate.
    #[error("Table for {what} needs at least 2 samples, got {len}")]
    TooFewSamples { what: &'static str, len: usize },

    /// Sample coordinates must be strictly increasing.
    #[error("Sample coordinates for {what} are not strictly increasing at index {index}")]
    NotIncreasing { what: &'static str, index: usize },

    /// Query outside the sampled range with extrapolation disabled.
    #[error("Value {x} is outside the table range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    /// A PVT record without any sample.
    #[error("PVT record {index} has no samples")]
    EmptyRecord { index: usize },

    /// The extension procedure found no later record with two or more samples.
    #[error(
        "PVT table is invalid: record {index} has a single sample and no later record \
         provides under-saturated samples to extend it"
    )]
    MissingMasterRecord { index: usize },

    /// The master record cannot provide ratios because a field of its first
    /// sample is zero.
    #[error("Master record {index} has a zero leading sample for {what}")]
    DegenerateMaster { index: usize, what: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl TableError {
    pub fn class(&self) -> ErrorClass {
        match self {
            TableError::Core(err) => err.class(),
            _ => ErrorClass::Logic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TableError::MissingMasterRecord { index: 4 };
        assert!(err.to_string().contains("record 4"));
        assert!(err.class().is_logic());

        let err = TableError::OutOfRange {
            x: 5.0,
            min: 0.0,
            max: 1.0,
        };
        assert!(err.to_string().contains("outside"));
    }
}
