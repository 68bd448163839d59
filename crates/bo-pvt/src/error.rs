//! PVT model errors.

use bo_core::{CoreError, ErrorClass};
use bo_solver::SolverError;
use bo_tables::TableError;
use thiserror::Error;

/// Result type for PVT operations.
pub type PvtResult<T> = Result<T, PvtError>;

/// Errors raised by the phase PVT models and their selectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PvtError {
    /// A selector was used before an approach was chosen.
    #[error("No PVT approach configured for the {phase} phase")]
    Unconfigured { phase: &'static str },

    /// The active model does not define the requested relation.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Region index {region} out of bounds ({num_regions} regions)")]
    InvalidRegion { region: usize, num_regions: usize },

    #[error("Region count mismatch for {what}: expected {expected}, found {found}")]
    RegionCountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid phase index {index}")]
    InvalidPhase { index: usize },

    #[error("Invalid component index {index}")]
    InvalidComponent { index: usize },

    /// Evaluation requested before `init_end`.
    #[error("Fluid system used before initialization finished")]
    NotInitialized,

    #[error("Invalid parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    /// A region was finalized without its table data.
    #[error("Missing {what} table for region {region}")]
    MissingTable { what: &'static str, region: usize },

    #[error("Reference densities of region {region} were never set")]
    MissingReferenceDensities { region: usize },

    /// Companion tables of a region do not share one grid.
    #[error("Tables {what} of region {region} are sampled on different grids")]
    InconsistentTables { what: &'static str, region: usize },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl PvtError {
    /// Solver failures are numerical; everything else is a caller or data defect.
    pub fn class(&self) -> ErrorClass {
        match self {
            PvtError::Solver(err) => err.class(),
            PvtError::Table(err) => err.class(),
            _ => ErrorClass::Logic,
        }
    }
}

impl From<CoreError> for PvtError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } | CoreError::NonPositive { what, value } => {
                PvtError::InvalidParameter { what, value }
            }
            CoreError::InvalidPhaseIndex { index } => PvtError::InvalidPhase { index },
            CoreError::InvalidComponentIndex { index } => PvtError::InvalidComponent { index },
        }
    }
}

/// Reject region indices outside `0..num_regions` at the input boundary.
pub fn check_region(region: usize, num_regions: usize) -> PvtResult<()> {
    if region < num_regions {
        Ok(())
    } else {
        Err(PvtError::InvalidRegion {
            region,
            num_regions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PvtError::Unconfigured { phase: "oil" };
        assert!(err.to_string().contains("oil"));
        assert!(err.class().is_logic());

        let err = PvtError::InvalidRegion {
            region: 3,
            num_regions: 2,
        };
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn solver_errors_stay_numerical() {
        let err: PvtError = SolverError::ConvergenceFailed {
            what: "oil saturation pressure",
            target: 0.1,
            last_pressure: 1e7,
        }
        .into();
        assert!(err.class().is_numerical());

        let err: PvtError = TableError::MissingMasterRecord { index: 0 }.into();
        assert!(err.class().is_logic());
    }

    #[test]
    fn core_errors_map_to_dedicated_variants() {
        let err: PvtError = CoreError::InvalidPhaseIndex { index: 7 }.into();
        assert_eq!(err, PvtError::InvalidPhase { index: 7 });

        let err: PvtError = CoreError::NonPositive {
            what: "oil reference density",
            value: -1.0,
        }
        .into();
        assert!(matches!(err, PvtError::InvalidParameter { .. }));
    }

    #[test]
    fn region_check() {
        assert!(check_region(0, 1).is_ok());
        assert!(check_region(1, 1).is_err());
    }
}
