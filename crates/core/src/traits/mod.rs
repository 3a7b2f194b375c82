//! Boundary traits for external collaborators

mod content;
mod speech;

pub use content::ContentBackend;
pub use speech::{SpeechCapability, SpeechRecognizer, SpeechSynthesizer};
