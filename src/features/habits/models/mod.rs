mod habit;

pub use habit::Habit;
