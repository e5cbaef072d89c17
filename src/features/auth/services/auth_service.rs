use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    RegisterRequestDto, TokenObtainRequestDto, TokenPairDto, TokenRefreshRequestDto,
    TokenRefreshResponseDto, UserResponseDto,
};
use crate::features::auth::model::{AuthenticatedUser, TokenType};
use crate::features::auth::models::{NewUser, User};
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::auth::repositories::UserRepository;
use crate::features::auth::services::TokenService;
use crate::features::auth::JwtValidator;

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";
const INACTIVE_USER: &str = "User not found or inactive";

/// Account registration, token issuance and caller resolution
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
    validator: Arc<JwtValidator>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<TokenService>,
        validator: Arc<JwtValidator>,
    ) -> Self {
        Self {
            users,
            tokens,
            validator,
        }
    }

    /// Create a regular (non-staff) account
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let password_hash = hash_password(&dto.password).map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::Internal("Failed to hash password".to_string())
        })?;

        let user = self
            .users
            .create(&NewUser {
                username: dto.username,
                email: dto.email.filter(|e| !e.is_empty()),
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {} ({})", user.id, user.username);
        Ok(user.into())
    }

    /// Exchange username/password for a token pair
    pub async fn obtain_token(&self, dto: TokenObtainRequestDto) -> Result<TokenPairDto> {
        let user = self
            .users
            .find_by_username(&dto.username)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let valid = verify_password(&dto.password, &user.password_hash).map_err(|e| {
            tracing::error!("Stored password hash for user {} is unreadable: {}", user.id, e);
            AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;
        if !valid {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.tokens.issue_pair(&user)
    }

    /// Issue a new access token from a refresh token
    pub async fn refresh_token(&self, dto: TokenRefreshRequestDto) -> Result<TokenRefreshResponseDto> {
        let claims = self.validator.decode_claims(&dto.refresh, TokenType::Refresh)?;
        let user = self.active_user(claims.sub).await?;

        Ok(TokenRefreshResponseDto {
            access: self.tokens.issue_access(&user)?,
        })
    }

    /// Resolve an access token to the caller.
    ///
    /// Flags come from the stored account, so deactivation, deletion and
    /// staff changes apply to tokens that are already issued.
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser> {
        let claims = self
            .validator
            .decode_claims(access_token, TokenType::Access)?;
        Ok(self.active_user(claims.sub).await?.into())
    }

    /// Profile of the authenticated caller
    pub async fn get_current_user(&self, user: &AuthenticatedUser) -> Result<UserResponseDto> {
        self.users
            .find_by_id(user.user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))
    }

    async fn active_user(&self, id: i64) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized(INACTIVE_USER.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryUserRepository;
    use std::time::Duration;

    const SECRET: &str = "auth-service-test-secret";

    fn service() -> (AuthService, Arc<InMemoryUserRepository>) {
        let users = Arc::new(InMemoryUserRepository::default());
        let service = AuthService::new(
            users.clone(),
            Arc::new(TokenService::new(
                SECRET,
                Duration::from_secs(3600),
                Duration::from_secs(86400),
            )),
            Arc::new(JwtValidator::new(SECRET, Duration::from_secs(0))),
        );
        (service, users)
    }

    fn registration(username: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            username: username.to_string(),
            email: Some(String::new()),
            password: "compost-heap".to_string(),
        }
    }

    fn credentials(username: &str, password: &str) -> TokenObtainRequestDto {
        TokenObtainRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn unauthorized_message(result: Result<impl std::fmt::Debug>) -> String {
        match result {
            Err(AppError::Unauthorized(msg)) => msg,
            other => panic!("expected 401, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let (service, _) = service();
        let created = service.register(registration("ranger")).await.unwrap();
        assert_eq!(created.username, "ranger");
        assert_eq!(created.email, None);
        assert!(!created.is_staff);

        match service.register(registration("ranger")).await {
            Err(AppError::Conflict(msg)) => {
                assert_eq!(msg, "A user with that username already exists.")
            }
            other => panic!("expected conflict, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_bad_password_and_inactive_account_share_message() {
        let (service, users) = service();
        let created = service.register(registration("ranger")).await.unwrap();

        assert!(service
            .obtain_token(credentials("ranger", "compost-heap"))
            .await
            .is_ok());

        let wrong = service
            .obtain_token(credentials("ranger", "wrong-password"))
            .await;
        assert_eq!(unauthorized_message(wrong), INVALID_CREDENTIALS);

        let unknown = service
            .obtain_token(credentials("nobody", "compost-heap"))
            .await;
        assert_eq!(unauthorized_message(unknown), INVALID_CREDENTIALS);

        users.set_active(created.id, false);
        let inactive = service
            .obtain_token(credentials("ranger", "compost-heap"))
            .await;
        assert_eq!(unauthorized_message(inactive), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_refresh_requires_refresh_token_of_active_user() {
        let (service, users) = service();
        let created = service.register(registration("ranger")).await.unwrap();
        let pair = service
            .obtain_token(credentials("ranger", "compost-heap"))
            .await
            .unwrap();

        let refreshed = service
            .refresh_token(TokenRefreshRequestDto {
                refresh: pair.refresh.clone(),
            })
            .await
            .unwrap();
        assert_eq!(
            service.authenticate(&refreshed.access).await.unwrap().user_id,
            created.id
        );

        let with_access = service
            .refresh_token(TokenRefreshRequestDto {
                refresh: pair.access.clone(),
            })
            .await;
        assert!(matches!(with_access, Err(AppError::Unauthorized(_))));

        users.set_active(created.id, false);
        let deactivated = service
            .refresh_token(TokenRefreshRequestDto {
                refresh: pair.refresh,
            })
            .await;
        assert_eq!(unauthorized_message(deactivated), INACTIVE_USER);
    }

    #[tokio::test]
    async fn test_authenticate_reads_current_account_state() {
        let (service, users) = service();
        let created = service.register(registration("ranger")).await.unwrap();
        users.set_staff(created.id, true);
        let pair = service
            .obtain_token(credentials("ranger", "compost-heap"))
            .await
            .unwrap();

        assert!(service.authenticate(&pair.access).await.unwrap().is_staff);

        // demotion applies to a token issued while staff
        users.set_staff(created.id, false);
        assert!(!service.authenticate(&pair.access).await.unwrap().is_staff);

        users.set_active(created.id, false);
        let inactive = service.authenticate(&pair.access).await;
        assert_eq!(unauthorized_message(inactive), INACTIVE_USER);

        users.remove(created.id);
        let deleted = service.authenticate(&pair.access).await;
        assert_eq!(unauthorized_message(deleted), INACTIVE_USER);

        assert!(matches!(
            service.authenticate(&pair.refresh).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
