use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a tracked eco-habit
#[derive(Debug, Clone, FromRow)]
pub struct Habit {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
