use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequestDto {
    #[serde(default)]
    #[schema(example = "How can I cut down on plastic at home?")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatReplyDto {
    pub reply: String,
}
