//! Conversational session state
//!
//! One session per user conversation. All mutation happens in response
//! to discrete events (user input, submission completion, restart,
//! language change) which run to completion before the next event is
//! processed; no two events touch the same session concurrently.

use serde::Serialize;

use saarthi_core::Language;

use crate::prompts::{is_affirmative, PromptKey};
use crate::step::ConversationStep;
use crate::validate::{normalize_phone, validate_email, validate_name};
use crate::ConversationError;

/// The structured fields collected by the guided form.
///
/// Each is absent until its step accepts an input; all four are present
/// by the time the confirm step is reached.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl CollectedFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn is_complete(&self) -> bool {
        self.name.is_some() && self.phone.is_some() && self.email.is_some() && self.message.is_some()
    }
}

/// Fully collected, validated fields handed to the submission boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

/// Result of feeding one input event into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Input was empty (or a too-short name); no state change, the
    /// caller simply re-prompts. Deliberately not a surfaced error.
    NoOp,
    /// Field accepted; the session moved to `step` and the prompt for
    /// it should be spoken. Speaking is a side effect and must not
    /// block the transition.
    Advanced {
        step: ConversationStep,
        speak: PromptKey,
    },
    /// Validation failed; the session stays on the current step with
    /// the error surfaced, and the user retries.
    Invalid(ConversationError),
    /// Affirmative input on the confirm step; the caller performs the
    /// (asynchronous) submission and reports back through
    /// [`ConversationSession::finish_submission`] with this generation.
    SubmissionStarted { generation: u64 },
}

/// Serializable view of a session for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub step: ConversationStep,
    pub fields: CollectedFields,
    pub language: Language,
    pub prompt: String,
    pub error: Option<String>,
    pub submitting: bool,
    pub auto_advance: bool,
}

/// The guided-form state machine.
#[derive(Debug)]
pub struct ConversationSession {
    step: ConversationStep,
    fields: CollectedFields,
    last_error: Option<ConversationError>,
    language: Language,
    auto_advance: bool,
    submitting: bool,
    // Bumped on restart and language change; async completions issued
    // under an older generation are discarded on arrival.
    generation: u64,
}

impl ConversationSession {
    pub fn new(language: Language) -> Self {
        Self {
            step: ConversationStep::Intro,
            fields: CollectedFields::default(),
            last_error: None,
            language,
            auto_advance: false,
            submitting: false,
            generation: 0,
        }
    }

    pub fn step(&self) -> ConversationStep {
        self.step
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&ConversationError> {
        self.last_error.as_ref()
    }

    pub fn fields(&self) -> &CollectedFields {
        &self.fields
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    /// Feed one user input (voice transcript or typed text) into the
    /// machine.
    pub fn handle_input(&mut self, input: &str) -> StepOutcome {
        if self.submitting {
            // Input is disabled while a submission is pending.
            return StepOutcome::NoOp;
        }

        self.last_error = None;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return StepOutcome::NoOp;
        }

        let outcome = match self.step {
            ConversationStep::Intro => self.advance(ConversationStep::Name),
            ConversationStep::Name => {
                if validate_name(trimmed) {
                    self.fields.name = Some(trimmed.to_string());
                    self.advance(ConversationStep::Phone)
                } else {
                    StepOutcome::NoOp
                }
            }
            ConversationStep::Phone => match normalize_phone(trimmed) {
                Ok(digits) => {
                    self.fields.phone = Some(digits);
                    self.advance(ConversationStep::Email)
                }
                Err(e) => self.reject(e),
            },
            ConversationStep::Email => match validate_email(trimmed) {
                Ok(()) => {
                    self.fields.email = Some(trimmed.to_string());
                    self.advance(ConversationStep::Message)
                }
                Err(e) => self.reject(e),
            },
            ConversationStep::Message => {
                self.fields.message = Some(trimmed.to_string());
                self.advance(ConversationStep::Confirm)
            }
            ConversationStep::Confirm => {
                if is_affirmative(trimmed, self.language) {
                    self.submitting = true;
                    tracing::debug!(generation = self.generation, "Submission started");
                    StepOutcome::SubmissionStarted {
                        generation: self.generation,
                    }
                } else {
                    // Anything else means "wants to edit": the whole
                    // collection sequence restarts from the name step.
                    self.advance(ConversationStep::Name)
                }
            }
            ConversationStep::Complete => StepOutcome::NoOp,
        };

        outcome
    }

    fn advance(&mut self, to: ConversationStep) -> StepOutcome {
        tracing::debug!(from = %self.step, to = %to, "Step transition");
        self.step = to;
        StepOutcome::Advanced {
            step: to,
            speak: to.prompt_key(),
        }
    }

    fn reject(&mut self, error: ConversationError) -> StepOutcome {
        tracing::debug!(step = %self.step, %error, "Input rejected");
        self.last_error = Some(error.clone());
        StepOutcome::Invalid(error)
    }

    /// The validated record handed off on submission; `None` until all
    /// four fields are collected.
    pub fn contact_record(&self) -> Option<ContactRecord> {
        if !self.fields.is_complete() {
            return None;
        }
        Some(ContactRecord {
            name: self.fields.name.clone()?,
            phone: self.fields.phone.clone()?,
            email: self.fields.email.clone()?,
            message: self.fields.message.clone()?,
        })
    }

    /// Apply the result of an asynchronous submission.
    ///
    /// Completions issued under an older generation (the session was
    /// restarted or re-targeted meanwhile) are discarded. On success
    /// the session reaches `Complete`; on failure it returns to
    /// `Confirm` with the error surfaced so the user can retry.
    pub fn finish_submission(
        &mut self,
        generation: u64,
        result: Result<(), String>,
    ) -> Option<PromptKey> {
        if generation != self.generation || !self.submitting {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "Discarding stale submission completion"
            );
            return None;
        }

        self.submitting = false;
        match result {
            Ok(()) => {
                self.step = ConversationStep::Complete;
                tracing::info!("Conversation submitted");
                Some(PromptKey::Complete)
            }
            Err(reason) => {
                self.step = ConversationStep::Confirm;
                self.last_error = Some(ConversationError::SubmissionFailed(reason));
                Some(PromptKey::Confirm)
            }
        }
    }

    /// Reset to the initial state: clears all collected fields and the
    /// error state and returns to the intro step. The caller cancels
    /// in-flight speech and speaks the intro prompt after a short
    /// delay.
    pub fn restart(&mut self) -> PromptKey {
        self.step = ConversationStep::Intro;
        self.fields.clear();
        self.last_error = None;
        self.submitting = false;
        self.generation += 1;
        tracing::debug!(generation = self.generation, "Session restarted");
        PromptKey::Intro
    }

    /// Change the session language.
    ///
    /// Never alters the step or any collected field and never
    /// re-validates them; the current step's prompt is re-spoken in the
    /// new language and the next voice capture uses it.
    pub fn set_language(&mut self, language: Language) -> PromptKey {
        self.language = language;
        self.generation += 1;
        tracing::debug!(language = %language, "Language changed");
        self.step.prompt_key()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            step: self.step,
            fields: self.fields.clone(),
            language: self.language,
            prompt: crate::prompts::prompt(self.language, self.step.prompt_key()).to_string(),
            error: self.last_error.as_ref().map(|e| e.to_string()),
            submitting: self.submitting,
            auto_advance: self.auto_advance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ConversationSession {
        ConversationSession::new(Language::English)
    }

    fn filled_session() -> ConversationSession {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu Sharma");
        s.handle_input("98765-43210");
        s.handle_input("anu@example.org");
        s.handle_input("Need help with a housing subsidy");
        s
    }

    #[test]
    fn test_intro_advances_on_any_input() {
        let mut s = session();
        assert_eq!(
            s.handle_input("hello"),
            StepOutcome::Advanced {
                step: ConversationStep::Name,
                speak: PromptKey::AskName,
            }
        );
        assert_eq!(s.step(), ConversationStep::Name);
    }

    #[test]
    fn test_empty_input_is_silent_noop() {
        let mut s = session();
        assert_eq!(s.handle_input("   "), StepOutcome::NoOp);
        assert_eq!(s.step(), ConversationStep::Intro);
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_single_char_name_rejected_silently() {
        let mut s = session();
        s.handle_input("hello");
        assert_eq!(s.handle_input("A"), StepOutcome::NoOp);
        assert_eq!(s.step(), ConversationStep::Name);
        assert!(s.fields().name.is_none());
    }

    #[test]
    fn test_name_accepted() {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu");
        assert_eq!(s.step(), ConversationStep::Phone);
        assert_eq!(s.fields().name.as_deref(), Some("Anu"));
    }

    #[test]
    fn test_phone_normalized_and_stored() {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu");
        s.handle_input("98765-43210");
        assert_eq!(s.step(), ConversationStep::Email);
        assert_eq!(s.fields().phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_short_phone_rejected_in_place() {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu");
        let outcome = s.handle_input("987654321");
        assert_eq!(outcome, StepOutcome::Invalid(ConversationError::InvalidPhone));
        assert_eq!(s.step(), ConversationStep::Phone);
        assert!(s.last_error().is_some());
    }

    #[test]
    fn test_invalid_email_rejected_in_place() {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu");
        s.handle_input("9876543210");
        let outcome = s.handle_input("not-an-email");
        assert_eq!(outcome, StepOutcome::Invalid(ConversationError::InvalidEmail));
        assert_eq!(s.step(), ConversationStep::Email);
    }

    #[test]
    fn test_error_cleared_on_next_input() {
        let mut s = session();
        s.handle_input("hello");
        s.handle_input("Anu");
        s.handle_input("123");
        assert!(s.last_error().is_some());
        s.handle_input("9876543210");
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_affirmative_starts_submission() {
        let mut s = filled_session();
        assert_eq!(s.step(), ConversationStep::Confirm);
        let outcome = s.handle_input("yeah sure");
        assert_eq!(outcome, StepOutcome::SubmissionStarted { generation: 0 });
        assert!(s.is_submitting());
    }

    #[test]
    fn test_non_affirmative_returns_to_name() {
        let mut s = filled_session();
        let outcome = s.handle_input("wait no");
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                step: ConversationStep::Name,
                speak: PromptKey::AskName,
            }
        );
        assert!(!s.is_submitting());
    }

    #[test]
    fn test_input_disabled_while_submitting() {
        let mut s = filled_session();
        s.handle_input("yes");
        assert_eq!(s.handle_input("more text"), StepOutcome::NoOp);
    }

    #[test]
    fn test_submission_success_completes() {
        let mut s = filled_session();
        let gen = match s.handle_input("yes") {
            StepOutcome::SubmissionStarted { generation } => generation,
            other => panic!("unexpected outcome: {:?}", other),
        };
        let speak = s.finish_submission(gen, Ok(()));
        assert_eq!(speak, Some(PromptKey::Complete));
        assert_eq!(s.step(), ConversationStep::Complete);
        assert!(!s.is_submitting());
    }

    #[test]
    fn test_submission_failure_returns_to_confirm() {
        let mut s = filled_session();
        let gen = match s.handle_input("yes") {
            StepOutcome::SubmissionStarted { generation } => generation,
            other => panic!("unexpected outcome: {:?}", other),
        };
        let speak = s.finish_submission(gen, Err("backend unavailable".to_string()));
        assert_eq!(speak, Some(PromptKey::Confirm));
        assert_eq!(s.step(), ConversationStep::Confirm);
        assert!(matches!(
            s.last_error(),
            Some(ConversationError::SubmissionFailed(_))
        ));
    }

    #[test]
    fn test_stale_submission_discarded_after_restart() {
        let mut s = filled_session();
        let gen = match s.handle_input("yes") {
            StepOutcome::SubmissionStarted { generation } => generation,
            other => panic!("unexpected outcome: {:?}", other),
        };
        s.restart();
        assert_eq!(s.finish_submission(gen, Ok(())), None);
        assert_eq!(s.step(), ConversationStep::Intro);
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut s = filled_session();
        let speak = s.restart();
        assert_eq!(speak, PromptKey::Intro);
        assert_eq!(s.step(), ConversationStep::Intro);
        assert!(s.fields().name.is_none());
        assert!(s.fields().phone.is_none());
        assert!(s.fields().email.is_none());
        assert!(s.fields().message.is_none());
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_language_change_keeps_step_and_fields() {
        let mut s = filled_session();
        let speak = s.set_language(Language::Hindi);
        assert_eq!(speak, PromptKey::Confirm);
        assert_eq!(s.step(), ConversationStep::Confirm);
        assert_eq!(s.language(), Language::Hindi);
        assert_eq!(s.fields().phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_contact_record_only_when_complete() {
        let mut s = session();
        assert!(s.contact_record().is_none());
        s.handle_input("hello");
        s.handle_input("Anu");
        assert!(s.contact_record().is_none());
        let s = filled_session();
        let record = s.contact_record().unwrap();
        assert_eq!(record.phone, "9876543210");
        assert_eq!(record.email, "anu@example.org");
    }
}
