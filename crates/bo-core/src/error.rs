use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// The two failure classes every PVT error falls into.
///
/// `Logic` failures are caller or configuration defects (bad indices, using a
/// selector before it was configured, invalid tables). They must not be
/// recovered from. `Numerical` failures, such as an iterative solver running
/// out of iterations, are legitimate runtime outcomes a caller may handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Logic,
    Numerical,
}

impl ErrorClass {
    pub fn is_logic(self) -> bool {
        self == ErrorClass::Logic
    }

    pub fn is_numerical(self) -> bool {
        self == ErrorClass::Numerical
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Phase index out of bounds (index={index}, len=3)")]
    InvalidPhaseIndex { index: usize },

    #[error("Component index out of bounds (index={index}, len=3)")]
    InvalidComponentIndex { index: usize },
}

impl CoreError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Logic
    }
}
