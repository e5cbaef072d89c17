use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{NewUser, User};

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

const USER_COLUMNS: &str =
    "id, username, email, password_hash, is_staff, is_superuser, is_active, date_joined";

/// Account lookups and registration
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username is taken
    async fn create(&self, user: &NewUser) -> Result<User>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(DUPLICATE_USERNAME.to_string())
                } else {
                    tracing::error!("Failed to create user: {:?}", e);
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
