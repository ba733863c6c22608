use serde::Deserialize;
use std::{collections::HashMap, env, str::FromStr};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub mock: MockConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            mock: MockConfig::from_env()?,
        })
    }
}

/// Parse an optional environment variable, falling back to `default` when unset
fn env_or<T: FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Logging Configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Ok(level) = env::var("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_SERVICES") {
            modules.insert("services".to_string(), level);
        }

        Ok(Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            modules,
        })
    }

    /// Build an `EnvFilter` directive such as `info,api=debug`
    pub fn filter_directive(&self) -> String {
        let mut filter = self.level.clone();

        // Sorted so the directive is stable regardless of map order
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter.push_str(&format!(",{module}={level}"));
        }

        filter
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}

/// Cross-origin policy. When enabled every origin, method and header is allowed,
/// credentials included.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
}

impl CorsConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            enabled: env_or("CORS_ENABLED", true)
                .map_err(|_| "CORS_ENABLED must be true or false")?,
        })
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Placeholder values returned by the emulated endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Path segment every emulated route is nested under
    pub api_prefix: String,
    /// Model name reported by chat completions, distinct from any requested model
    pub chat_model: String,
    pub chat_content: String,
    pub embedding_dimensions: usize,
    pub embedding_value: f32,
}

impl MockConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            chat_model: env::var("MOCK_CHAT_MODEL").unwrap_or(defaults.chat_model),
            chat_content: env::var("MOCK_CHAT_CONTENT").unwrap_or(defaults.chat_content),
            embedding_dimensions: env_or(
                "MOCK_EMBEDDING_DIMENSIONS",
                defaults.embedding_dimensions,
            )?,
            embedding_value: env_or("MOCK_EMBEDDING_VALUE", defaults.embedding_value)?,
        })
    }

    /// Prefix without a trailing slash; the root prefix becomes an empty string
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/v1".to_string(),
            chat_model: "chat-mock".to_string(),
            chat_content: "Hello world".to_string(),
            embedding_dimensions: 3,
            embedding_value: 0.1,
        }
    }
}
