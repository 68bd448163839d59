//! bo-pvt: phase PVT models of the black-oil fluid description.
//!
//! Provides:
//! - oil models: dead oil, live oil (dissolved gas), constant compressibility
//! - gas models: dry gas, wet gas (vaporized oil)
//! - water model: constant compressibility
//! - one selector (multiplexer) per phase owning the active model
//!
//! # Architecture
//!
//! Every model stores its data per PVT region and evaluates its relations
//! generically over `bo_core::Evaluation`. The `OilPvtModel` and
//! `GasPvtModel` traits fix the operation set of a phase; the multiplexers are
//! closed sum types over the concrete models and forward each call with a
//! single `match`. Oil and gas relations that depend on the other phase
//! (flash-consistent fugacity coefficients) receive the counterpart
//! multiplexer as a shared borrow.
//!
//! # Example
//!
//! ```no_run
//! use bo_pvt::{DeadOilPvt, OilPvtModel, RegionReference};
//! use bo_core::units::kg_per_m3;
//! use bo_tables::Interpolation;
//!
//! let mut oil = DeadOilPvt::new(1);
//! oil.set_table(0, &[(1e5, 1.0, 1e-3), (2e7, 1.2, 1.5e-3)], Interpolation::Linear)
//!     .unwrap();
//! let reference =
//!     RegionReference::from_densities(kg_per_m3(800.0), kg_per_m3(1000.0), kg_per_m3(1.2))
//!         .unwrap();
//! oil.set_region_reference(0, reference);
//!
//! let rho: f64 = oil.density(0, 300.0, 1e5, 0.0).unwrap();
//! println!("Oil density: {} kg/m³", rho);
//! ```

pub mod compressibility;
mod dissolution;
pub mod error;
pub mod fugacity;
pub mod gas;
pub mod multiplexer;
pub mod oil;
pub mod region;
mod saturation;
pub mod traits;
pub mod water;

// Re-exports for ergonomics
pub use compressibility::ConstantCompressibility;
pub use error::{PvtError, PvtResult, check_region};
pub use gas::{DryGasPvt, WetGasPvt};
pub use multiplexer::{
    GasPvtApproach, GasPvtMultiplexer, OilPvtApproach, OilPvtMultiplexer, WaterPvtApproach,
    WaterPvtMultiplexer,
};
pub use oil::{ConstantCompressibilityOilPvt, DeadOilPvt, LiveOilPvt};
pub use region::RegionReference;
pub use traits::{GasPvtModel, OilPvtModel};
pub use water::ConstantCompressibilityWaterPvt;
