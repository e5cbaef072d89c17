use axum::Json;

use crate::features::auth::model::AuthenticatedUser;
use crate::features::trucks::dtos::TruckLocationDto;
use crate::features::trucks::services;
use crate::shared::types::ApiResponse;

/// Current (simulated) garbage truck positions
#[utoipa::path(
    get,
    path = "/api/trucks/locations",
    responses(
        (status = 200, description = "Truck positions", body = ApiResponse<Vec<TruckLocationDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "trucks"
)]
pub async fn list_truck_locations(
    _user: AuthenticatedUser,
) -> Json<ApiResponse<Vec<TruckLocationDto>>> {
    Json(ApiResponse::success(
        Some(services::current_locations()),
        None,
        None,
    ))
}
