//! Conversational guided-form state machine
//!
//! Collects name, phone, email and message through alternating
//! voice/text input, validates each field, and walks a fixed step
//! sequence with a confirm/edit loop. Speech is driven through the
//! capability traits in `saarthi-core`; sessions stay fully usable with
//! text input alone when speech is unavailable.

pub mod prompts;
pub mod session;
pub mod speech;
pub mod step;
pub mod validate;

pub use prompts::{is_affirmative, prompt, PromptKey};
pub use session::{
    CollectedFields, ContactRecord, ConversationSession, SessionSnapshot, StepOutcome,
};
pub use speech::SpeechCoordinator;
pub use step::ConversationStep;
pub use validate::{normalize_phone, validate_email, validate_name};

use thiserror::Error;

/// Recoverable conversational errors.
///
/// Validation failures re-prompt on the same step; a submission failure
/// returns the session to the confirm step. None of these are hard
/// failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
}
