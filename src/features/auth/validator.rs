use super::model::{Claims, TokenType};
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::time::Duration;

/// Verifies HS256 tokens issued by [`super::TokenService`]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    /// Decode a token and check that it is of the expected type
    pub fn decode_claims(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Token is invalid or expired: {}", e)))?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::Unauthorized(
                "Token has wrong type".to_string(),
            ));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::services::TokenService;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn token_service() -> TokenService {
        TokenService::new(SECRET, Duration::from_secs(3600), Duration::from_secs(86400))
    }

    #[test]
    fn test_access_token_carries_subject() {
        let user = crate::shared::test_helpers::user_row(7, "alice", true);
        let access = token_service().issue_access(&user).unwrap();

        let validator = JwtValidator::new(SECRET, Duration::from_secs(0));
        let claims = validator.decode_claims(&access, TokenType::Access).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert!(claims.is_staff);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let user = crate::shared::test_helpers::user_row(7, "alice", false);
        let pair = token_service().issue_pair(&user).unwrap();

        let validator = JwtValidator::new(SECRET, Duration::from_secs(0));
        assert!(validator
            .decode_claims(&pair.refresh, TokenType::Access)
            .is_err());
        assert!(validator
            .decode_claims(&pair.refresh, TokenType::Refresh)
            .is_ok());
    }

    #[test]
    fn test_expired_token_fails() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "bob".to_string(),
            is_staff: false,
            is_superuser: false,
            token_type: TokenType::Access,
            exp: now - 300,
            iat: now - 600,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let validator = JwtValidator::new(SECRET, Duration::from_secs(60));
        assert!(validator.decode_claims(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_different_secret_fails() {
        let user = crate::shared::test_helpers::user_row(1, "carol", false);
        let access = token_service().issue_access(&user).unwrap();

        let validator = JwtValidator::new("another-secret", Duration::from_secs(0));
        assert!(validator.decode_claims(&access, TokenType::Access).is_err());
    }
}
