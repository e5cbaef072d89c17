use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::chat::dtos::ChatReplyDto;
use crate::modules::gemini::ChatModel;
use crate::shared::templates;

/// GreenBot: wraps user messages in the assistant prompt
pub struct ChatService {
    model: Option<Arc<dyn ChatModel>>,
}

impl ChatService {
    /// `None` when no model API key is configured
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { model }
    }

    pub async fn reply(&self, message: &str) -> Result<ChatReplyDto> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }

        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("AI key not configured".to_string()))?;

        let prompt = templates::render(
            templates::GREENBOT_PROMPT,
            minijinja::context! { message => message },
        )
        .map_err(|e| AppError::Internal(format!("Failed to render chat prompt: {}", e)))?;

        let reply = model.generate(&prompt).await.map_err(|e| {
            tracing::error!("Chat model request failed: {}", e);
            AppError::ExternalServiceError("Failed to get a response from AI.".to_string())
        })?;

        Ok(ChatReplyDto { reply })
    }
}
