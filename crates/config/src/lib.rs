// Configuration Management
//
// This crate handles all configuration loading for the mock inference API.
// It provides:
// - Configuration structs and deserialization
// - File and environment loading logic
// - Default values for a local mock deployment

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Invalid environment configuration: {0}")]
    Environment(String),
}

/// Default config file locations, tried in order
pub const CONFIG_PATHS: [&str; 3] = ["config/config.yaml", "config.yaml", "config/default.yaml"];

/// Main configuration loading interface
impl ApiConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML document. Missing sections take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ApiConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from default locations, falling back to the environment
    pub fn load() -> Result<Self, ConfigError> {
        for path in &CONFIG_PATHS {
            if Path::new(path).exists() {
                return Self::load_from_file(path);
            }
        }

        Self::from_env().map_err(ConfigError::Environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9001\nmock:\n  chat_model: test-mock\n  embedding_dimensions: 8"
        )
        .unwrap();

        let config = ApiConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.mock.chat_model, "test-mock");
        assert_eq!(config.mock.embedding_dimensions, 8);
        assert_eq!(config.mock.api_prefix, "/api/v1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_empty_yaml_yields_defaults() {
        let config = ApiConfig::from_yaml("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = ApiConfig::from_yaml("server:\n  port: not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ApiConfig::load_from_file("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    #[serial]
    fn test_load_reports_invalid_environment() {
        types::tests::clear_env();
        std::env::set_var("MOCK_EMBEDDING_DIMENSIONS", "-1");

        let result = ApiConfig::load();
        types::tests::clear_env();

        match result {
            Err(ConfigError::Environment(message)) => {
                assert_eq!(message, "MOCK_EMBEDDING_DIMENSIONS has an invalid value: -1")
            }
            other => panic!("expected an environment error, got {other:?}"),
        }
    }
}
