//! Configuration for the Saarthi backend
//!
//! Settings are layered: `config/default.toml` → `config/{env}.toml` →
//! environment variables prefixed `SAARTHI__`. Invalid values fail
//! validation at startup rather than surfacing mid-request.

mod settings;

pub use settings::{
    load_settings, AiConfig, CatalogConfig, ConversationConfig, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
