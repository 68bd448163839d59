//! Gas phase PVT models.

pub mod dry;
pub mod wet;

pub use dry::DryGasPvt;
pub use wet::WetGasPvt;

use bo_core::Evaluation;

/// The gas component in the gas phase behaves like an ideal gas: φ = 1.
pub(crate) fn gas_component_coefficient<D: Evaluation>() -> D {
    D::one()
}
