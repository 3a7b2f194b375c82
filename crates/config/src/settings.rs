//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Scheme catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Content-generation provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Conversational session configuration
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enforce the configured CORS origin list
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins; empty defaults to localhost
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Scheme catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the static scheme catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "data/schemes.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Content-generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chat-completion endpoint (explanations, grievance templates)
    #[serde(default = "default_chat_endpoint")]
    pub chat_endpoint: String,

    /// Chat model name
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Chat API key; read from SAARTHI__AI__CHAT_API_KEY in production
    #[serde(default)]
    pub chat_api_key: Option<String>,

    /// Online-search endpoint (supplementary scheme information)
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Search model name
    #[serde(default = "default_search_model")]
    pub search_model: String,

    /// Search API key
    #[serde(default)]
    pub search_api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum tokens per generation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_chat_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o".to_string()
}

fn default_search_endpoint() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_search_model() -> String {
    "llama-3.1-sonar-small-128k-online".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    700
}

fn default_temperature() -> f32 {
    0.2
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            chat_endpoint: default_chat_endpoint(),
            chat_model: default_chat_model(),
            chat_api_key: None,
            search_endpoint: default_search_endpoint(),
            search_model: default_search_model(),
            search_api_key: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Conversational session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Maximum concurrent sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle timeout before a session is expired (seconds)
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Interval between expiry sweeps (seconds)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    /// Delay before the intro prompt is spoken after a restart (ms),
    /// so the prompt does not race the client UI reset
    #[serde(default = "default_restart_prompt_delay_ms")]
    pub restart_prompt_delay_ms: u64,
}

fn default_max_sessions() -> usize {
    100
}

fn default_session_timeout_secs() -> u64 {
    1800
}

fn default_cleanup_interval_secs() -> u64 {
    300
}

fn default_restart_prompt_delay_ms() -> u64 {
    300
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            session_timeout_secs: default_session_timeout_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            restart_prompt_delay_ms: default_restart_prompt_delay_ms(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings; called once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.path".to_string(),
                message: "Catalog path must not be empty".to_string(),
            });
        }

        if self.ai.timeout_secs == 0 || self.ai.timeout_secs > 300 {
            return Err(ConfigError::InvalidValue {
                field: "ai.timeout_secs".to_string(),
                message: format!("Must be between 1 and 300, got {}", self.ai.timeout_secs),
            });
        }

        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "ai.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.ai.temperature),
            });
        }

        if self.conversation.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "conversation.max_sessions".to_string(),
                message: "Must allow at least one session".to_string(),
            });
        }

        if self.environment.is_production() && self.ai.chat_api_key.is_none() {
            tracing::warn!("No chat API key configured; every AI call will use the local fallback");
        }

        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.toml` > `config/default.toml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        builder = builder.add_source(File::from(default_path));
    }

    if let Some(env_name) = env {
        let env_path = format!("config/{}.toml", env_name);
        if Path::new(&env_path).exists() {
            builder = builder.add_source(File::with_name(&env_path));
        }
    }

    let settings: Settings = builder
        .add_source(Environment::with_prefix("SAARTHI").separator("__"))
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.catalog.path, "data/schemes.json");
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut settings = Settings::default();
        settings.ai.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_temperature_rejected() {
        let mut settings = Settings::default();
        settings.ai.temperature = 3.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_sessions_rejected() {
        let mut settings = Settings::default();
        settings.conversation.max_sessions = 0;
        assert!(settings.validate().is_err());
    }
}
