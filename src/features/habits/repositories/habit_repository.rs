use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::habits::models::Habit;

/// Persistence for per-user habits
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// The user's habits, newest first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Habit>>;

    async fn create(&self, user_id: i64, name: &str) -> Result<Habit>;

    /// Whether a habit owned by `user_id` was removed
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool>;
}

pub struct PgHabitRepository {
    pool: PgPool,
}

impl PgHabitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HabitRepository for PgHabitRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            "SELECT id, user_id, name, created_at FROM habits \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(habits)
    }

    async fn create(&self, user_id: i64, name: &str) -> Result<Habit> {
        sqlx::query_as::<_, Habit>(
            "INSERT INTO habits (user_id, name) VALUES ($1, $2) \
             RETURNING id, user_id, name, created_at",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create habit: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
