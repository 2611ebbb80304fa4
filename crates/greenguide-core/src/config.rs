use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API credentials. Environment-only, never written to disk.
    #[serde(skip)]
    pub credentials: Credentials,

    /// Base URLs of the external services
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// HTTP client behaviour
    #[serde(default)]
    pub http: HttpConfig,

    /// Generative-text settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Initial values for the shell inputs
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const FOURSQUARE_API_KEY: &str = "FOURSQUARE_API_KEY";
pub const WEATHERBIT_API_KEY: &str = "WEATHERBIT_API_KEY";
pub const TREFLE_API_KEY: &str = "TREFLE_API_KEY";
pub const OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

/// The five service credentials, read once at startup.
///
/// A missing key is sent as an empty string; the remote service rejects it
/// and the rejection travels the normal failure path.
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini: Option<String>,
    pub foursquare: Option<String>,
    pub weatherbit: Option<String>,
    pub trefle: Option<String>,
    pub opencage: Option<String>,
}

impl Credentials {
    /// Read all credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup. Empty values count
    /// as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            gemini: read(GEMINI_API_KEY),
            foursquare: read(FOURSQUARE_API_KEY),
            weatherbit: read(WEATHERBIT_API_KEY),
            trefle: read(TREFLE_API_KEY),
            opencage: read(OPENCAGE_API_KEY),
        }
    }

    pub fn gemini(&self) -> &str {
        self.gemini.as_deref().unwrap_or_default()
    }

    pub fn foursquare(&self) -> &str {
        self.foursquare.as_deref().unwrap_or_default()
    }

    pub fn weatherbit(&self) -> &str {
        self.weatherbit.as_deref().unwrap_or_default()
    }

    pub fn trefle(&self) -> &str {
        self.trefle.as_deref().unwrap_or_default()
    }

    pub fn opencage(&self) -> &str {
        self.opencage.as_deref().unwrap_or_default()
    }

    /// Names of the environment variables that were not set.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (GEMINI_API_KEY, &self.gemini),
            (FOURSQUARE_API_KEY, &self.foursquare),
            (WEATHERBIT_API_KEY, &self.weatherbit),
            (TREFLE_API_KEY, &self.trefle),
            (OPENCAGE_API_KEY, &self.opencage),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("gemini", &mask(&self.gemini))
            .field("foursquare", &mask(&self.foursquare))
            .field("weatherbit", &mask(&self.weatherbit))
            .field("trefle", &mask(&self.trefle))
            .field("opencage", &mask(&self.opencage))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Foursquare places search
    #[serde(default = "default_foursquare_url")]
    pub foursquare: String,
    /// OpenCage geocoding
    #[serde(default = "default_opencage_url")]
    pub opencage: String,
    /// SoilGrids soil queries
    #[serde(default = "default_soilgrids_url")]
    pub soilgrids: String,
    /// Weatherbit current weather
    #[serde(default = "default_weatherbit_url")]
    pub weatherbit: String,
    /// Trefle plant database
    #[serde(default = "default_trefle_url")]
    pub trefle: String,
    /// Gemini generative language API
    #[serde(default = "default_gemini_url")]
    pub gemini: String,
}

fn default_foursquare_url() -> String {
    "https://api.foursquare.com".to_string()
}

fn default_opencage_url() -> String {
    "https://api.opencagedata.com".to_string()
}

fn default_soilgrids_url() -> String {
    "https://rest.soilgrids.org".to_string()
}

fn default_weatherbit_url() -> String {
    "https://api.weatherbit.io".to_string()
}

fn default_trefle_url() -> String {
    "https://trefle.io".to_string()
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            foursquare: default_foursquare_url(),
            opencage: default_opencage_url(),
            soilgrids: default_soilgrids_url(),
            weatherbit: default_weatherbit_url(),
            trefle: default_trefle_url(),
            gemini: default_gemini_url(),
        }
    }
}

impl EndpointsConfig {
    /// Point every service at the same base URL (used against a local mock server).
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            foursquare: base.clone(),
            opencage: base.clone(),
            soilgrids: base.clone(),
            weatherbit: base.clone(),
            trefle: base.clone(),
            gemini: base,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for the soil query, the only call with an explicit bound
    #[serde(default = "default_soil_timeout_secs")]
    pub soil_timeout_secs: u64,

    /// Skip certificate verification for places search and geocoding
    /// (DEVELOPMENT ONLY)
    ///
    /// WARNING: This is a security risk. It only takes effect in debug builds
    /// and only for those two services.
    #[serde(default)]
    pub allow_invalid_certs: bool,
}

fn default_soil_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            soil_timeout_secs: default_soil_timeout_secs(),
            allow_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier passed to generateContent
    #[serde(default = "default_chat_model")]
    pub model: String,
}

fn default_chat_model() -> String {
    "gemini-pro".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// City shown in the city input on startup
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_city() -> String {
    "Mumbai".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing,
    /// then read credentials from the environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(Self {
                credentials: Credentials::from_env(),
                ..config
            });
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;
        config.credentials = Credentials::from_env();

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error carrying every validation error when any is found.
    /// Warnings are returned for the caller to log once logging is set up.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        let endpoints = [
            ("endpoints.foursquare", &self.endpoints.foursquare),
            ("endpoints.opencage", &self.endpoints.opencage),
            ("endpoints.soilgrids", &self.endpoints.soilgrids),
            ("endpoints.weatherbit", &self.endpoints.weatherbit),
            ("endpoints.trefle", &self.endpoints.trefle),
            ("endpoints.gemini", &self.endpoints.gemini),
        ];
        for (field, url) in endpoints {
            self.validate_url(url, field, &mut result);
        }

        if self.http.soil_timeout_secs == 0 {
            result.add_error("http.soil_timeout_secs", "Soil timeout must be greater than 0");
        } else if self.http.soil_timeout_secs > 300 {
            result.add_warning(
                "http.soil_timeout_secs",
                "Soil timeout is unusually long (>300s)",
            );
        }

        if self.http.allow_invalid_certs {
            result.add_warning(
                "http.allow_invalid_certs",
                "Certificate verification is disabled for places search and geocoding (debug builds only)",
            );
        }

        if self.chat.model.trim().is_empty() {
            result.add_error("chat.model", "Model identifier cannot be empty");
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            result.add_error(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                ),
            );
        }

        // Missing keys only fail at request time
        for name in self.credentials.missing() {
            result.add_warning(name, "Not set - requests to this service will be rejected");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to a file. Credentials are never written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("greenguide");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_keys(name: &str) -> Option<String> {
        Some(format!("test-{}", name.to_lowercase()))
    }

    #[test]
    fn test_valid_default_config() {
        let config = Config {
            credentials: Credentials::from_lookup(all_keys),
            ..Config::default()
        };
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.city, "Mumbai");
        assert_eq!(config.chat.model, "gemini-pro");
        assert_eq!(config.http.soil_timeout_secs, 10);
        assert!(!config.http.allow_invalid_certs);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.endpoints.weatherbit = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "endpoints.weatherbit"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.endpoints.trefle = "ftp://trefle.io".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_soil_timeout() {
        let mut config = Config::default();
        config.http.soil_timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "http.soil_timeout_secs"));
    }

    #[test]
    fn test_empty_model_is_error() {
        let mut config = Config::default();
        config.chat.model = "  ".to_string();
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_missing_credentials_are_warnings() {
        let config = Config {
            credentials: Credentials::from_lookup(|name| {
                (name != TREFLE_API_KEY).then(|| "key".to_string())
            }),
            ..Config::default()
        };
        let result = config.validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, TREFLE_API_KEY);
    }

    #[test]
    fn test_insecure_tls_is_warning() {
        let mut config = Config {
            credentials: Credentials::from_lookup(all_keys),
            ..Config::default()
        };
        config.http.allow_invalid_certs = true;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "http.allow_invalid_certs"));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let creds = Credentials::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(creds.missing().len(), 5);
        assert_eq!(creds.weatherbit(), "");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = Credentials::from_lookup(all_keys);
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("test-"));
        assert!(debug.contains("<set>"));
    }

    #[test]
    fn test_save_and_load_round_trip_skips_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config {
            credentials: Credentials::from_lookup(all_keys),
            ..Config::default()
        };
        config.defaults.city = "Pune".to_string();
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("test-"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.city, "Pune");
        assert_eq!(loaded.endpoints.gemini, config.endpoints.gemini);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nmodel = \"gemini-1.5-flash\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.chat.model, "gemini-1.5-flash");
        assert_eq!(loaded.defaults.city, "Mumbai");
        assert_eq!(loaded.endpoints.trefle, "https://trefle.io");
    }

    #[test]
    fn test_load_validated_rejects_invalid_file_with_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nmodel = \"\"\n[http]\nsoil_timeout_secs = 0\n").unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        let Some(ConfigError::Invalid(summary)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected ConfigError::Invalid, got {err}");
        };
        assert!(summary.contains("chat.model"));
        assert!(summary.contains("http.soil_timeout_secs"));
    }

    #[test]
    fn test_load_validated_hands_back_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\nallow_invalid_certs = true\n").unwrap();

        let (config, validation) = Config::load_validated(Some(&path)).unwrap();
        assert!(config.http.allow_invalid_certs);
        assert!(validation
            .warnings
            .iter()
            .any(|w| w.field == "http.allow_invalid_certs"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_endpoints_all_trims_trailing_slash() {
        let endpoints = EndpointsConfig::all("http://127.0.0.1:9000/");
        assert_eq!(endpoints.trefle, "http://127.0.0.1:9000");
        assert_eq!(endpoints.gemini, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
