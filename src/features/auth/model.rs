use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::models::User;

/// Caller resolved from an access token and the current account row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    /// Staff portal access: staff members and superusers
    pub fn has_staff_access(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// Distinguishes the two halves of a token pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims embedded in access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's database id
    pub sub: i64,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier (UUID v4)
    pub jti: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}
