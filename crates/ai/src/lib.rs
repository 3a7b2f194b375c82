//! Content generation for scheme explanations, grievance templates and
//! scheme lookups
//!
//! Two remote backends share an OpenAI-compatible chat completions
//! shape: a chat backend for structured generation and a search backend
//! for live scheme lookups. Every generation path has a deterministic
//! local fallback, so callers always get usable content even with no
//! network or keys configured.

pub mod backend;
pub mod fallback;
pub mod generator;

pub use backend::{ChatBackend, SearchBackend};
pub use generator::ContentGenerator;

use thiserror::Error;

/// Content-generation errors. All of them are absorbed by the
/// fallback layer in [`ContentGenerator`]; only backend constructors
/// surface them to callers.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

impl From<AiError> for saarthi_core::Error {
    fn from(e: AiError) -> Self {
        saarthi_core::Error::Provider(e.to_string())
    }
}
