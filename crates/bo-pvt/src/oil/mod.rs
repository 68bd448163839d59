//! Oil phase PVT models.

pub mod constant_compressibility;
pub mod dead;
pub mod live;

pub use constant_compressibility::ConstantCompressibilityOilPvt;
pub use dead::DeadOilPvt;
pub use live::LiveOilPvt;

use crate::error::PvtResult;
use crate::fugacity::{LOW_AFFINITY_FACTOR, OIL_PSEUDO_VAPOR_PRESSURE_PA, pseudo_vapor_coefficient};
use bo_core::Evaluation;

/// φ of the oil component in the oil phase.
pub(crate) fn oil_component_coefficient<D: Evaluation>(pressure: D) -> D {
    pseudo_vapor_coefficient(OIL_PSEUDO_VAPOR_PRESSURE_PA, pressure)
}

/// φ of a component that stays out of a gas-free oil phase.
pub(crate) fn excluded_component_coefficient<D: Evaluation>(pressure: D) -> PvtResult<D> {
    Ok(oil_component_coefficient(pressure) * LOW_AFFINITY_FACTOR)
}
