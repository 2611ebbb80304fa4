pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    ChatConfig, Config, Credentials, DefaultsConfig, EndpointsConfig, HttpConfig, LoggingConfig,
    ValidationResult,
};
pub use error::ConfigError;

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (normally `logging.level`
/// from the config) is used.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Green Guide core initialized");
    Ok(())
}
