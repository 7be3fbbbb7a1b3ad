//! # Configuration
//!
//! Layered configuration: built-in defaults, then an optional file (TOML, YAML or
//! JSON, picked by extension), then `SOLDERA__SECTION__KEY` environment variables.
//!
//! ```rust,no_run
//! use soldera_core::config::SolderaConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SolderaConfig::load(None)?;
//! println!("polling every {:?}", config.polling.interval());
//! # Ok(())
//! # }
//! ```

use crate::client::Credentials;
use crate::constants::{NOTIFICATION_AUTO_HIDE, POLL_INTERVAL};
use crate::error::{SolderaError, SolderaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const ENV_PREFIX: &str = "SOLDERA";
const ENV_SEPARATOR: &str = "__";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolderaConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the auction results backend
    pub base_url: String,
    /// Request timeout in milliseconds, enforced by the transport
    pub timeout_ms: u64,
    /// Anti-forgery token attached to the refresh submission
    pub csrf_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30000,
            csrf_token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.csrf_token.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long success/info notifications stay visible
    pub auto_hide_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_hide_ms: NOTIFICATION_AUTO_HIDE.as_millis() as u64,
        }
    }
}

impl NotificationConfig {
    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SolderaConfig {
    /// Load defaults, an optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> SolderaResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(config = %config.sanitized(), "Configuration loaded");

        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> SolderaResult<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> SolderaResult<()> {
        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| {
            SolderaError::ConfigurationError(format!(
                "Invalid api.base_url '{}': {e}",
                self.api.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SolderaError::ConfigurationError(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_ms == 0 {
            return Err(SolderaError::ConfigurationError(
                "api.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.polling.interval_ms == 0 {
            return Err(SolderaError::ConfigurationError(
                "polling.interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.notifications.auto_hide_ms == 0 {
            return Err(SolderaError::ConfigurationError(
                "notifications.auto_hide_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// JSON view of the configuration with credential fields masked
    pub fn sanitized(&self) -> serde_json::Value {
        let mut value = serde_json::json!(self);
        mask_sensitive(&mut value);
        value
    }
}

fn mask_sensitive(value: &mut serde_json::Value) {
    const SENSITIVE: [&str; 4] = ["token", "secret", "password", "credential"];

    if let serde_json::Value::Object(map) = value {
        for (key, val) in map.iter_mut() {
            let key = key.to_lowercase();
            if SENSITIVE.iter().any(|pattern| key.contains(pattern)) {
                if !val.is_null() {
                    *val = serde_json::Value::String("[MASKED]".to_string());
                }
            } else {
                mask_sensitive(val);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_timings() {
        let config = SolderaConfig::default();
        assert_eq!(config.polling.interval(), Duration::from_secs(1));
        assert_eq!(config.notifications.auto_hide(), Duration::from_millis(3000));
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.api.csrf_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SolderaConfig::default();
        config.polling.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(SolderaError::ConfigurationError(_))
        ));

        let mut config = SolderaConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = SolderaConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sanitized_masks_token() {
        let mut config = SolderaConfig::default();
        config.api.csrf_token = Some("abcdef123456".to_string());

        let sanitized = config.sanitized();
        assert_eq!(sanitized["api"]["csrf_token"], "[MASKED]");
        assert_eq!(sanitized["api"]["base_url"], "http://localhost:8000");
    }
}
