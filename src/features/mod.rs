pub mod auth;
pub mod chat;
pub mod habits;
pub mod reports;
pub mod trucks;
