use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::habits::models::Habit;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHabitDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Bring a reusable bottle")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HabitResponseDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Habit> for HabitResponseDto {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name,
            created_at: habit.created_at,
        }
    }
}
