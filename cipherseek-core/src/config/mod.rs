//! Configuration management for Cipherseek
//!
//! This module provides environment-based configuration management with
//! support for defaults, TOML files, and validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

mod error;

pub use error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ledger contract endpoint configuration
    pub ledger: LedgerConfig,

    /// Encryption gateway configuration
    pub gateway: GatewayConfig,

    /// Status notice display windows
    pub status: StatusConfig,

    /// Search submission defaults
    pub search: SearchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Ledger contract endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// RPC endpoint of the ledger node
    pub endpoint: String,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Encryption gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Endpoint of the encryption-parameter service
    pub endpoint: String,

    /// Timeout for the one-time initialization handshake
    #[serde(with = "humantime_serde")]
    pub handshake_timeout: Duration,
}

/// How long status notices stay visible before auto-expiring.
///
/// These windows are cosmetic only; they never abort an in-flight call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Display window for search submission notices
    #[serde(with = "humantime_serde")]
    pub search_window: Duration,

    /// Display window for availability check notices
    #[serde(with = "humantime_serde")]
    pub check_window: Duration,

    /// Display window for decrypt notices
    #[serde(with = "humantime_serde")]
    pub decrypt_window: Duration,
}

/// Search submission defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keyword code submitted when the draft keyword does not parse as an
    /// integer. Falling back instead of failing is deliberate policy.
    pub sentinel_keyword: u64,

    /// Category code submitted when the draft category does not parse
    pub default_category: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON formatting
    pub json_format: bool,

    /// Include target module
    pub with_target: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            gateway: GatewayConfig::default(),
            status: StatusConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8545".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:7077".to_string(),
            handshake_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            search_window: Duration::from_secs(3),
            check_window: Duration::from_secs(2),
            decrypt_window: Duration::from_secs(3),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sentinel_keyword: 1001,
            default_category: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: CIPHERSEEK_<SECTION>_<KEY>
    /// Example: CIPHERSEEK_LEDGER_ENDPOINT=http://node.example:8545
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var("CIPHERSEEK_LEDGER_ENDPOINT") {
            config.ledger.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("CIPHERSEEK_LEDGER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid ledger request timeout: {}", e))
            })?;
            config.ledger.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(endpoint) = env::var("CIPHERSEEK_GATEWAY_ENDPOINT") {
            config.gateway.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("CIPHERSEEK_GATEWAY_HANDSHAKE_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid gateway handshake timeout: {}", e))
            })?;
            config.gateway.handshake_timeout = Duration::from_secs(secs);
        }

        if let Ok(sentinel) = env::var("CIPHERSEEK_SEARCH_SENTINEL_KEYWORD") {
            config.search.sentinel_keyword = sentinel.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid sentinel keyword: {}", e))
            })?;
        }
        if let Ok(category) = env::var("CIPHERSEEK_SEARCH_DEFAULT_CATEGORY") {
            config.search.default_category = category.parse().map_err(|e| {
                ConfigError::InvalidValue(format!("Invalid default category: {}", e))
            })?;
        }

        if let Ok(level) = env::var("CIPHERSEEK_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("CIPHERSEEK_LOG_JSON") {
            config.logging.json_format = json
                .parse()
                .map_err(|e| ConfigError::InvalidValue(format!("Invalid JSON log flag: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.endpoint.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Ledger endpoint must not be empty".to_string(),
            ));
        }
        if self.gateway.endpoint.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Gateway endpoint must not be empty".to_string(),
            ));
        }
        if self.status.search_window.is_zero()
            || self.status.check_window.is_zero()
            || self.status.decrypt_window.is_zero()
        {
            return Err(ConfigError::ValidationFailed(
                "Status display windows must be non-zero".to_string(),
            ));
        }
        if self.search.default_category == 0 {
            return Err(ConfigError::ValidationFailed(
                "Default category code must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.sentinel_keyword, 1001);
        assert_eq!(config.search.default_category, 1);
        assert_eq!(config.status.search_window, Duration::from_secs(3));
        assert_eq!(config.status.check_window, Duration::from_secs(2));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.ledger.endpoint = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = Config::default();
        config.status.decrypt_window = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serialized.as_bytes()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.ledger.endpoint, config.ledger.endpoint);
        assert_eq!(loaded.search.sentinel_keyword, config.search.sentinel_keyword);
        assert_eq!(loaded.status.decrypt_window, config.status.decrypt_window);
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = Config::from_file("/nonexistent/cipherseek.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
