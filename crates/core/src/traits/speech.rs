//! Speech capability traits
//!
//! Speech output and capture run in the client runtime; the core only
//! drives them through these interfaces. The runtime may not provide
//! speech at all, so capability is detected once at session start and
//! modeled as [`SpeechCapability`]: `Available` exposes the real
//! interfaces, `Unavailable` is a no-op and the flow stays usable via
//! text input alone. Transcripts reach the session as plain text input;
//! the recognizer interface only controls capture.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Language, Result};

/// Text-to-speech interface
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak the given text in the given language.
    ///
    /// Returns once playback has been started, not once it finishes.
    async fn speak(&self, text: &str, language: Language) -> Result<()>;

    /// Stop any in-progress speech output.
    async fn stop(&self) -> Result<()>;

    /// Whether speech output is currently playing.
    fn is_speaking(&self) -> bool;
}

/// Speech-to-text interface
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin capturing voice input in the given language.
    async fn start_capture(&self, language: Language) -> Result<()>;

    /// Stop capturing voice input.
    async fn stop_capture(&self) -> Result<()>;

    /// Update the recognition language for the next capture.
    fn set_language(&self, language: Language);

    /// Whether capture is currently active.
    fn is_listening(&self) -> bool;
}

/// Speech capability, selected once when a session starts.
#[derive(Clone)]
pub enum SpeechCapability {
    /// Runtime provides both synthesis and recognition
    Available {
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
    },
    /// Runtime has no speech support; all operations are no-ops
    Unavailable,
}

impl SpeechCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, SpeechCapability::Available { .. })
    }
}

impl std::fmt::Debug for SpeechCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeechCapability::Available { .. } => write!(f, "SpeechCapability::Available"),
            SpeechCapability::Unavailable => write!(f, "SpeechCapability::Unavailable"),
        }
    }
}
