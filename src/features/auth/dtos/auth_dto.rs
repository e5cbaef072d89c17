use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::models::User;
use crate::shared::validation::USERNAME_REGEX;

/// Request DTO for account registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        regex(
            path = *USERNAME_REGEX,
            message = "Username may contain only letters, digits and @/./+/-/_"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request DTO for obtaining a token pair
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TokenObtainRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

/// Access + refresh token pair
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenPairDto {
    pub access: String,
    pub refresh: String,
}

/// Response DTO for token refresh
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenRefreshResponseDto {
    pub access: String,
}

/// Account profile returned by register and /auth/me
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequestDto {
            username: "eco_friend".to_string(),
            email: Some("friend@example.com".to_string()),
            password: "long-enough".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequestDto {
            username: "has space".to_string(),
            email: Some("not-an-email".to_string()),
            password: "short".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_email_is_optional() {
        let dto = RegisterRequestDto {
            username: "anon".to_string(),
            email: None,
            password: "long-enough".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
