//! Upstream language model access for the chat proxy.
//!
//! The proxy talks to one provider through the [`ChatProvider`] trait.
//! The production implementation is [`GroqChatProvider`]; tests substitute
//! their own.

pub mod error;
pub mod groq;
pub mod prompt;

pub use error::ChatError;
pub use groq::GroqChatProvider;

use async_trait::async_trait;

/// A single-shot chat completion backend.
///
/// Implementations are stateless per call: each `complete` is independent,
/// and overlapping calls need no coordination.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Complete one user message and return the assistant's reply verbatim.
    ///
    /// # Errors
    ///
    /// Returns a tagged [`ChatError`] describing which stage failed.
    async fn complete(&self, message: &str) -> Result<String, ChatError>;
}
