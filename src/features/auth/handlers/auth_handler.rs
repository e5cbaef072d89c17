use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::dtos::{
    RegisterRequestDto, TokenObtainRequestDto, TokenPairDto, TokenRefreshRequestDto,
    TokenRefreshResponseDto, UserResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Obtain an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = TokenObtainRequestDto,
    responses(
        (status = 200, description = "Token pair issued", body = ApiResponse<TokenPairDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn obtain_token(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<TokenObtainRequestDto>,
) -> Result<Json<ApiResponse<TokenPairDto>>> {
    let pair = service.obtain_token(dto).await?;
    Ok(Json(ApiResponse::success(Some(pair), None, None)))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/token/refresh",
    request_body = TokenRefreshRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<TokenRefreshResponseDto>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    ValidatedJson(dto): ValidatedJson<TokenRefreshRequestDto>,
) -> Result<Json<ApiResponse<TokenRefreshResponseDto>>> {
    let response = service.refresh_token(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get_current_user(&user).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
