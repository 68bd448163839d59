//! Configuration errors.

use bo_core::ErrorClass;
use bo_pvt::PvtError;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {what}")]
    Validation { what: String },

    #[error("PVT setup failed: {0}")]
    Pvt(#[from] PvtError),
}

impl ConfigError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ConfigError::Pvt(err) => err.class(),
            _ => ErrorClass::Logic,
        }
    }
}
