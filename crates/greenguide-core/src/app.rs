use anyhow::Result;
use std::path::Path;

use crate::{Config, ValidationResult};

/// Application state built once at startup; pages borrow the config from here.
pub struct App {
    config: Config,
    validation: ValidationResult,
}

impl App {
    /// Load and validate configuration, from `config_path` when given.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config, validation) = Config::load_validated(config_path)?;
        Ok(Self { config, validation })
    }

    /// Wrap an already-built configuration (tests, embedding).
    pub fn from_config(config: Config) -> Self {
        let validation = config.validate();
        Self { config, validation }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Warnings collected while validating the config
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn shutdown(&self) {
        tracing::info!("Shutting down application");
    }
}
