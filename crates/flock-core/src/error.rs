//! Top-level error type for running a simulation.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration, fatal to simulation start
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// Failure preparing the output directory
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
