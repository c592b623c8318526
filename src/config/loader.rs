//! Configuration loading from disk.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is an absolute http(s) URL
//! - Validate value ranges (timeout > 0)

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic validation of an already-deserialized config.
pub fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.base_url.is_empty() {
        return Err(ConfigError::Invalid("base_url must be set".to_string()));
    }

    let parsed = url::Url::parse(&config.base_url).map_err(|e| {
        ConfigError::Invalid(format!("base_url '{}' is not a URL: {}", config.base_url, e))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!(
            "base_url scheme '{}' is not http or https",
            parsed.scheme()
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_validate_accepts_http_and_https() {
        validate_config(&config("http://localhost:8080")).unwrap();
        validate_config(&config("https://api.example.com/v2")).unwrap();
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let err = validate_config(&config("")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_non_http_schemes() {
        let err = validate_config(&config("ftp://example.com")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_relative_urls() {
        let err = validate_config(&config("/api/v1")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = config("http://localhost");
        config.timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
