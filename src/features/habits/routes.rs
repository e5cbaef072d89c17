use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::habits::handlers;
use crate::features::habits::services::HabitService;

pub fn routes(service: Arc<HabitService>) -> Router {
    Router::new()
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/{id}", delete(handlers::delete_habit))
        .with_state(service)
}
