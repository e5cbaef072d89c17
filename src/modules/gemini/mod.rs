//! Generative language model used by the GreenBot assistant.

mod gemini_client;

use async_trait::async_trait;

pub use gemini_client::GeminiClient;

#[derive(Debug, thiserror::Error)]
pub enum ChatModelError {
    #[error("model API key is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model response had no text candidate")]
    EmptyResponse,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a text completion for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String, ChatModelError>;
}
