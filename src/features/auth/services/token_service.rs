use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::TokenPairDto;
use crate::features::auth::model::{Claims, TokenType};
use crate::features::auth::models::User;
use jsonwebtoken::{encode, EncodingKey, Header};
use std::time::Duration;
use uuid::Uuid;

/// Issues HS256 access/refresh token pairs
pub struct TokenService {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a fresh access + refresh pair for the user
    pub fn issue_pair(&self, user: &User) -> Result<TokenPairDto> {
        Ok(TokenPairDto {
            access: self.issue(user, TokenType::Access, self.access_ttl)?,
            refresh: self.issue(user, TokenType::Refresh, self.refresh_ttl)?,
        })
    }

    /// Issue only an access token (used by the refresh flow)
    pub fn issue_access(&self, user: &User) -> Result<String> {
        self.issue(user, TokenType::Access, self.access_ttl)
    }

    fn issue(&self, user: &User, token_type: TokenType, ttl: Duration) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            token_type,
            exp: now + ttl.as_secs() as i64,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign {:?} token: {}", token_type, e);
            AppError::Internal(format!("Failed to sign token: {}", e))
        })
    }
}
