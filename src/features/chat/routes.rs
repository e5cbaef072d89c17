use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::chat::handlers;
use crate::features::chat::services::ChatService;

pub fn routes(service: Arc<ChatService>) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .with_state(service)
}
