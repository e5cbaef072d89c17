pub mod habit_handler;

pub use habit_handler::*;
