//! Core types and traits for the Saarthi scheme assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - Scheme catalog records and user profiles
//! - Language definitions (12 Indian locales)
//! - AI content types (explanations, grievance templates)
//! - Error taxonomy
//! - Boundary traits for speech and content generation

pub mod error;
pub mod language;
pub mod scheme;
pub mod traits;

pub use error::{Error, Result};
pub use language::Language;
pub use scheme::{
    AiExplanation, Gender, GrievanceTemplate, MatchResult, Scheme, UserProfile, GENDER_ALL,
    INDIAN_STATES, SECTORS, STATE_NATIONAL,
};
pub use traits::{ContentBackend, SpeechCapability, SpeechRecognizer, SpeechSynthesizer};
