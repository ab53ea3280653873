//! Application settings and configuration management

use crate::error::Result;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
///
/// The model registry is compiled-in and deliberately absent here: nothing
/// in the configuration surface can add or remove models.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backends: BackendsSettings,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    11435
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Per-provider backend endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendsSettings {
    #[serde(default = "default_anthropic_endpoint")]
    pub anthropic: BackendEndpoint,
    #[serde(default = "default_openai_endpoint")]
    pub openai: BackendEndpoint,
}

/// A single backend endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendEndpoint {
    pub base_url: String,
    /// Name of the environment variable holding the API key
    #[serde(default)]
    pub token_env: Option<String>,
}

impl BackendEndpoint {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.token_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
    }
}

fn default_anthropic_endpoint() -> BackendEndpoint {
    BackendEndpoint {
        base_url: "https://api.anthropic.com".to_string(),
        token_env: Some("ANTHROPIC_API_KEY".to_string()),
    }
}

fn default_openai_endpoint() -> BackendEndpoint {
    BackendEndpoint {
        base_url: "https://api.openai.com".to_string(),
        token_env: Some("OPENAI_API_KEY".to_string()),
    }
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/gateway.toml")
    }

    /// Load settings from a specific configuration file path
    ///
    /// Layering: compiled-in defaults, then the file (if present), then
    /// `OLLAMA_GATEWAY__`-prefixed environment variables
    /// (e.g. `OLLAMA_GATEWAY__SERVER__PORT=11500`).
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", 11435)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("backends.anthropic.base_url", "https://api.anthropic.com")?
            .set_default("backends.anthropic.token_env", "ANTHROPIC_API_KEY")?
            .set_default("backends.openai.base_url", "https://api.openai.com")?
            .set_default("backends.openai.token_env", "OPENAI_API_KEY")?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("OLLAMA_GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(crate::error::AppError::Config(
                config::ConfigError::Message("Server port cannot be 0".to_string()),
            ));
        }
        for (name, endpoint) in [
            ("anthropic", &self.backends.anthropic),
            ("openai", &self.backends.openai),
        ] {
            if endpoint.base_url.is_empty() {
                return Err(crate::error::AppError::Config(
                    config::ConfigError::Message(format!(
                        "Backend '{}' must have a base_url",
                        name
                    )),
                ));
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            backends: BackendsSettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for BackendsSettings {
    fn default() -> Self {
        Self {
            anthropic: default_anthropic_endpoint(),
            openai: default_openai_endpoint(),
        }
    }
}
