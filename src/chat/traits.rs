use async_trait::async_trait;

use crate::error::EvalError;

use super::message::ChatMessage;

/// A reply returned by a chat provider.
///
/// Some providers hand back a structured message, others only something that
/// renders as text; `text()` covers the first shape and `Display` the second.
pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
}

/// Plain strings are valid replies; scripted providers and tests return them directly.
impl ChatResponse for String {
    fn text(&self) -> Option<String> {
        Some(self.clone())
    }
}

/// Trait for providers that support chat-style interactions.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, EvalError>;

    /// Sends a single user prompt and returns the raw reply.
    async fn invoke(&self, prompt: &str) -> Result<Box<dyn ChatResponse>, EvalError> {
        let req = [ChatMessage::user().content(prompt).build()];
        self.chat(&req).await
    }
}

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for Box<T> {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, EvalError> {
        (**self).chat(messages).await
    }
}

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for std::sync::Arc<T> {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, EvalError> {
        (**self).chat(messages).await
    }
}
