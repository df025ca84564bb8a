use std::future::Future;

use crate::error_handler::AiLlmError;

pub mod open_ai_service;

/// A backend that turns one prompt into one raw text answer.
///
/// Implemented by [`open_ai_service::OpenAiService`]; callers stay generic over
/// it so they can be exercised with scripted answers. The returned future is
/// `Send` so implementors can be driven from multi-threaded handlers.
pub trait ChatCompletion {
    /// Sends `prompt` and returns the model's raw answer text.
    ///
    /// # Errors
    /// [`AiLlmError::Model`] after the implementor's own retry budget is spent.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}
