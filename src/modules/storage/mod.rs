//! Storage module for report images
//!
//! Provides the [`ObjectStorage`] seam and its MinIO/S3-compatible implementation.

mod minio_client;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;

/// Object store holding uploaded report images
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key`
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> Result<(), AppError>;

    /// Time-limited URL for reading the object at `key`
    async fn presigned_url(&self, key: &str) -> Result<String, AppError>;
}

/// Build a unique object key for a report image:
/// `{prefix}/{user_id}/{uuid_v7}.{extension}`
pub fn image_key(prefix: &str, user_id: i64, content_type: &str) -> String {
    let extension = match content_type {
        "image/png" => "png",
        _ => "jpg",
    };
    format!("{}/{}/{}.{}", prefix, user_id, uuid::Uuid::now_v7(), extension)
}
