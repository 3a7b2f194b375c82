//! Conversation steps

use serde::{Deserialize, Serialize};

use crate::prompts::PromptKey;

/// Steps of the guided form, in fixed order.
///
/// Each non-terminal step has exactly one successor on success.
/// `Confirm` branches: affirmative input triggers submission toward
/// `Complete`; anything else returns to `Name` and the user re-enters
/// the whole sequence. `Complete` only transitions back to `Intro` on
/// an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    #[default]
    Intro,
    Name,
    Phone,
    Email,
    Message,
    Confirm,
    Complete,
}

impl ConversationStep {
    /// The designated successor on a successful input.
    pub fn successor(&self) -> Option<ConversationStep> {
        match self {
            ConversationStep::Intro => Some(ConversationStep::Name),
            ConversationStep::Name => Some(ConversationStep::Phone),
            ConversationStep::Phone => Some(ConversationStep::Email),
            ConversationStep::Email => Some(ConversationStep::Message),
            ConversationStep::Message => Some(ConversationStep::Confirm),
            ConversationStep::Confirm => Some(ConversationStep::Complete),
            ConversationStep::Complete => None,
        }
    }

    /// The prompt spoken/shown while on this step.
    pub fn prompt_key(&self) -> PromptKey {
        match self {
            ConversationStep::Intro => PromptKey::Intro,
            ConversationStep::Name => PromptKey::AskName,
            ConversationStep::Phone => PromptKey::AskPhone,
            ConversationStep::Email => PromptKey::AskEmail,
            ConversationStep::Message => PromptKey::AskMessage,
            ConversationStep::Confirm => PromptKey::Confirm,
            ConversationStep::Complete => PromptKey::Complete,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationStep::Complete)
    }
}

impl std::fmt::Display for ConversationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConversationStep::Intro => "intro",
            ConversationStep::Name => "name",
            ConversationStep::Phone => "phone",
            ConversationStep::Email => "email",
            ConversationStep::Message => "message",
            ConversationStep::Confirm => "confirm",
            ConversationStep::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}
