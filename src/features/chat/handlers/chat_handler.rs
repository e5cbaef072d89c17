use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::chat::dtos::{ChatReplyDto, ChatRequestDto};
use crate::features::chat::services::ChatService;
use crate::shared::types::ApiResponse;

/// Ask GreenBot for environmental advice
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Assistant reply", body = ApiResponse<ChatReplyDto>),
        (status = 400, description = "Message is required"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Failed to get a response from AI"),
        (status = 503, description = "AI key not configured")
    ),
    security(("bearer_auth" = [])),
    tag = "chat"
)]
pub async fn chat(
    user: AuthenticatedUser,
    State(service): State<Arc<ChatService>>,
    AppJson(dto): AppJson<ChatRequestDto>,
) -> Result<Json<ApiResponse<ChatReplyDto>>> {
    tracing::debug!("Chat request from user {}", user.user_id);
    let reply = service.reply(&dto.message).await?;
    Ok(Json(ApiResponse::success(Some(reply), None, None)))
}
