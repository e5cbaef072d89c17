//! Role-based authorization guards.
//!
//! The auth middleware resolves the caller into request extensions; guards
//! read it back and check flags before the handler body runs.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for the staff portal.
///
/// Allows users flagged `is_staff` or `is_superuser`.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireStaff(user): RequireStaff) { ... }
/// ```
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_staff_access() {
            tracing::debug!("User {} denied staff access", user.user_id);
            return Err(AppError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ));
        }

        Ok(RequireStaff(user.clone()))
    }
}
