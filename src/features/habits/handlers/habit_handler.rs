use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::habits::dtos::{CreateHabitDto, HabitResponseDto};
use crate::features::habits::services::HabitService;
use crate::shared::types::{ApiResponse, Meta};

/// List the caller's habits
#[utoipa::path(
    get,
    path = "/api/habits",
    responses(
        (status = 200, description = "Habits, newest first", body = ApiResponse<Vec<HabitResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "habits"
)]
pub async fn list_habits(
    user: AuthenticatedUser,
    State(service): State<Arc<HabitService>>,
) -> Result<Json<ApiResponse<Vec<HabitResponseDto>>>> {
    let habits = service.list(user.user_id).await?;
    let total = habits.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(habits),
        None,
        Some(Meta { total }),
    )))
}

/// Start tracking a habit
#[utoipa::path(
    post,
    path = "/api/habits",
    request_body = CreateHabitDto,
    responses(
        (status = 201, description = "Habit created", body = ApiResponse<HabitResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "habits"
)]
pub async fn create_habit(
    user: AuthenticatedUser,
    State(service): State<Arc<HabitService>>,
    ValidatedJson(dto): ValidatedJson<CreateHabitDto>,
) -> Result<(StatusCode, Json<ApiResponse<HabitResponseDto>>)> {
    let habit = service.create(user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(habit), None, None)),
    ))
}

/// Stop tracking a habit
#[utoipa::path(
    delete,
    path = "/api/habits/{id}",
    params(
        ("id" = i64, Path, description = "Habit ID")
    ),
    responses(
        (status = 200, description = "Habit deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Habit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "habits"
)]
pub async fn delete_habit(
    user: AuthenticatedUser,
    State(service): State<Arc<HabitService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(user.user_id, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Habit deleted".to_string()),
        None,
    )))
}
