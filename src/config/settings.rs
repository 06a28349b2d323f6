//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default Figma REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.figma.com";

/// Environment variable holding the Figma personal access token.
pub const ACCESS_TOKEN_ENV: &str = "FIGMA_ACCESS_TOKEN";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Figma API settings.
    #[serde(default)]
    pub figma: FigmaConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.figma.api_base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "Invalid figma.api_base_url '{base}'. Must start with http:// or https://"
                ),
            });
        }

        if self.figma.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "figma.timeout_secs must be greater than zero".to_string(),
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "Invalid logging level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Resolves the access token.
    ///
    /// A non-empty `FIGMA_ACCESS_TOKEN` environment variable takes precedence
    /// over `figma.access_token`.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.access_token_with(std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    fn access_token_with(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.figma
                    .access_token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
            })
    }
}

/// Figma REST API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigmaConfig {
    /// Base URL of the REST API.
    /// Default: `https://api.figma.com`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Personal access token, used when `FIGMA_ACCESS_TOKEN` is unset.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
