pub mod habit_dto;

pub use habit_dto::*;
