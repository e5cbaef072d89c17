mod habit_repository;

pub use habit_repository::{HabitRepository, PgHabitRepository};
