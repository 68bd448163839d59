//! Runtime selection of the PVT model of each phase.
//!
//! Each selector is a closed sum type over the concrete models of its phase
//! plus `NoPvt`. Switching the approach replaces the active model with a
//! fresh one. Evaluating a `NoPvt` selector is a logic error reported as
//! `PvtError::Unconfigured`.

mod gas;
mod oil;
mod water;

pub use gas::{GasPvtApproach, GasPvtMultiplexer};
pub use oil::{OilPvtApproach, OilPvtMultiplexer};
pub use water::{WaterPvtApproach, WaterPvtMultiplexer};
