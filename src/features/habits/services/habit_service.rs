use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::habits::dtos::{CreateHabitDto, HabitResponseDto};
use crate::features::habits::repositories::HabitRepository;

/// Per-user habit list
pub struct HabitService {
    repository: Arc<dyn HabitRepository>,
}

impl HabitService {
    pub fn new(repository: Arc<dyn HabitRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<HabitResponseDto>> {
        let habits = self.repository.list_for_user(user_id).await?;
        Ok(habits.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, user_id: i64, dto: CreateHabitDto) -> Result<HabitResponseDto> {
        let habit = self.repository.create(user_id, &dto.name).await?;
        tracing::info!("Created habit {} for user {}", habit.id, user_id);
        Ok(habit.into())
    }

    /// Only the owner may delete; other users' habits look absent
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        if !self.repository.delete(user_id, id).await? {
            return Err(AppError::NotFound(format!("Habit {} not found", id)));
        }
        tracing::info!("Deleted habit {} of user {}", id, user_id);
        Ok(())
    }
}
