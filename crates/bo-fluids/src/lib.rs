//! bo-fluids: the black-oil fluid system.
//!
//! `BlackOilFluidSystem` composes one PVT selector per phase with per-region
//! reference densities and answers property queries for a fluid state.
//! Systems are built programmatically (`init_begin` .. `init_end`) or from a
//! YAML/JSON configuration document.

pub mod config;
pub mod error;
pub mod fluid_system;
pub mod state;

pub use config::{FluidSystemConfig, load_json, load_yaml, save_json, save_yaml, validate_config};
pub use error::{ConfigError, ConfigResult};
pub use fluid_system::BlackOilFluidSystem;
pub use state::{FluidState, ParameterCache};
