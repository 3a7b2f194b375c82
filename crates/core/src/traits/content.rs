//! Content-generation provider boundary

use async_trait::async_trait;

use crate::Result;

/// An opaque text-generation provider.
///
/// The core never inspects provider internals; it sends a system and a
/// user message and receives text back. A failed call is terminal for
/// that request; callers recover with a deterministic local fallback,
/// never a retry.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    /// Generate a completion for the given system/user message pair.
    ///
    /// When `json_response` is set the provider is asked to emit a
    /// valid JSON object.
    async fn complete(&self, system: &str, user: &str, json_response: bool) -> Result<String>;

    /// Provider/model name for logging
    fn model_name(&self) -> &str;
}
