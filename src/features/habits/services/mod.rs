pub mod habit_service;

pub use habit_service::HabitService;
