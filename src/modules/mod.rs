//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for object storage, label detection,
//! generative chat and outbound mail.

pub mod gemini;
pub mod mail;
pub mod storage;
pub mod vision;
