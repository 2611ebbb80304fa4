//! Errors raised while loading `config.toml`.
//!
//! Lookup failures have their own type in the services crate; everything
//! else reaches the binary as `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// The file parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
