//! lariat.toml configuration parser.
//!
//! Every endpoint the demo runners talk to is supplied by the hosting
//! environment. Precedence: built-in defaults, then an optional TOML file,
//! then `LARIAT_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Top-level configuration for the daemon and all demo runners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LariatConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default = "DatabaseConfig::distributed_default")]
    pub distributed_db: DatabaseConfig,
    #[serde(default = "DatabaseConfig::relational_default")]
    pub relational_db: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Port the greeter API listens on.
    pub port: u16,
    /// Base URL the `/client` endpoint uses to call back into this
    /// process. Defaults to `http://localhost:{port}`.
    pub self_url: Option<String>,
}

/// Message broker (NATS) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Broker URL, e.g. `nats://localhost:4222`.
    pub url: String,
}

/// Image annotation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Base URL of the annotation API.
    pub endpoint: String,
    /// Optional API key appended as a `key` query parameter.
    pub api_key: Option<String>,
    /// Remote image the label demo fetches and annotates.
    pub image_url: String,
}

/// A database connection target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            self_url: None,
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vision.googleapis.com".to_string(),
            api_key: None,
            image_url: "https://storage.googleapis.com/pgtm-jlong-bucket/cat.jpg".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Default target for the distributed (Postgres-wire) table.
    fn distributed_default() -> Self {
        Self {
            url: "postgres://root@localhost:26257/reservations".to_string(),
        }
    }

    /// Default target for the conventional relational table.
    fn relational_default() -> Self {
        Self {
            url: "mysql://root@localhost:3306/reservations".to_string(),
        }
    }
}

impl Default for LariatConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            broker: BrokerConfig::default(),
            vision: VisionConfig::default(),
            distributed_db: DatabaseConfig::distributed_default(),
            relational_db: DatabaseConfig::relational_default(),
        }
    }
}

impl HttpConfig {
    /// Resolve the base URL for self-calls issued by `/client`.
    pub fn self_url(&self) -> String {
        self.self_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

impl LariatConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration: defaults, then the optional file, then
    /// `LARIAT_*` environment variables.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment-style overrides from a lookup function.
    ///
    /// Separated from `load` so tests can inject values without touching
    /// process environment.
    pub fn apply_overrides<F>(&mut self, get: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("LARIAT_HTTP_PORT") {
            self.http.port = v
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("LARIAT_HTTP_PORT: {v}")))?;
        }
        if let Some(v) = get("LARIAT_HTTP_SELF_URL") {
            self.http.self_url = Some(v);
        }
        if let Some(v) = get("LARIAT_BROKER_URL") {
            self.broker.url = v;
        }
        if let Some(v) = get("LARIAT_VISION_ENDPOINT") {
            self.vision.endpoint = v;
        }
        if let Some(v) = get("LARIAT_VISION_API_KEY") {
            self.vision.api_key = Some(v);
        }
        if let Some(v) = get("LARIAT_VISION_IMAGE_URL") {
            self.vision.image_url = v;
        }
        if let Some(v) = get("LARIAT_DISTRIBUTED_DB_URL") {
            self.distributed_db.url = v;
        }
        if let Some(v) = get("LARIAT_RELATIONAL_DB_URL") {
            self.relational_db.url = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = LariatConfig::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.self_url(), "http://localhost:8080");
        assert_eq!(config.broker.url, "nats://localhost:4222");
        assert!(config.vision.api_key.is_none());
        assert!(config.distributed_db.url.starts_with("postgres://"));
        assert!(config.relational_db.url.starts_with("mysql://"));
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config: LariatConfig = toml::from_str("").unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.broker.url, "nats://localhost:4222");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[http]
port = 9090

[broker]
url = "nats://broker.internal:4222"
"#;
        let config: LariatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.self_url(), "http://localhost:9090");
        assert_eq!(config.broker.url, "nats://broker.internal:4222");
        // Untouched sections keep their defaults.
        assert_eq!(config.vision.endpoint, "https://vision.googleapis.com");
    }

    #[test]
    fn explicit_self_url_wins() {
        let toml_str = r#"
[http]
port = 9090
self_url = "http://greeter.internal"
"#;
        let config: LariatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.http.self_url(), "http://greeter.internal");
    }

    #[test]
    fn from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[http]\nport = 7070\n").unwrap();

        let config = LariatConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.port, 7070);
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = LariatConfig::from_file(Path::new("/nonexistent/lariat.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn overrides_replace_values() {
        let mut env = HashMap::new();
        env.insert("LARIAT_HTTP_PORT", "9191");
        env.insert("LARIAT_BROKER_URL", "nats://override:4222");
        env.insert("LARIAT_VISION_API_KEY", "secret");
        env.insert("LARIAT_RELATIONAL_DB_URL", "mysql://db:3306/reservations");

        let mut config = LariatConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.http.port, 9191);
        assert_eq!(config.broker.url, "nats://override:4222");
        assert_eq!(config.vision.api_key.as_deref(), Some("secret"));
        assert_eq!(config.relational_db.url, "mysql://db:3306/reservations");
        // Untouched values keep their defaults.
        assert!(config.distributed_db.url.starts_with("postgres://"));
    }

    #[test]
    fn invalid_port_override_rejected() {
        let mut config = LariatConfig::default();
        let err = config
            .apply_overrides(|key| (key == "LARIAT_HTTP_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
