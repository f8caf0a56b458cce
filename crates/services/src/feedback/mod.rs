mod chat;

use async_trait::async_trait;

use crate::error::FeedbackError;

pub use chat::{ChatFeedbackConfig, ChatFeedbackRequester, ChatMessage, build_messages};

/// Produces coaching feedback for one answered question.
///
/// Implementations make a single attempt per call. Callers decide what to do
/// with a failure; nothing is retried here.
#[async_trait]
pub trait FeedbackRequester: Send + Sync {
    /// Request feedback on `answer` to `question` under `system_prompt`.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` on transport, authentication or upstream failures.
    async fn request(
        &self,
        system_prompt: &str,
        question: &str,
        answer: &str,
    ) -> Result<String, FeedbackError>;
}
