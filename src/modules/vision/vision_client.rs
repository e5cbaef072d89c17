use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::VisionConfig;
use crate::core::error::AppError;

use super::{match_labels, DetectedLabel, LabelDetector, LabelMatch, MAX_LABELS};

/// Placeholder value shipped in sample env files
const PLACEHOLDER_API_KEY: &str = "key";

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("label detection API key is not configured or invalid")]
    MissingApiKey,

    #[error("image content is empty")]
    EmptyImage,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: [AnnotateImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent,
    features: [Feature<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature<'a> {
    #[serde(rename = "type")]
    feature_type: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

/// Client for the Cloud Vision `images:annotate` REST endpoint
pub struct VisionClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            api_url: config.api_url,
        })
    }

    /// Single LABEL_DETECTION call, no retries
    pub async fn annotate(&self, image: &[u8]) -> Result<Vec<DetectedLabel>, VisionError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| *k != PLACEHOLDER_API_KEY)
            .ok_or(VisionError::MissingApiKey)?;

        if image.is_empty() {
            return Err(VisionError::EmptyImage);
        }

        let payload = AnnotateRequest {
            requests: [AnnotateImageRequest {
                image: ImageContent {
                    content: BASE64.encode(image),
                },
                features: [Feature {
                    feature_type: "LABEL_DETECTION",
                    max_results: MAX_LABELS,
                }],
            }],
        };

        let url = format!("{}?key={}", self.api_url, urlencoding::encode(api_key));
        tracing::debug!(
            "Sending label detection request ({} image bytes) to {}",
            image.len(),
            self.api_url
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Status { status, body });
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionError::MalformedResponse(e.to_string()))?;

        let first = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| VisionError::MalformedResponse("empty responses array".to_string()))?;

        if let Some(err) = first.error {
            return Err(VisionError::MalformedResponse(err.message));
        }

        tracing::debug!("Label detection returned {} labels", first.label_annotations.len());

        Ok(first
            .label_annotations
            .into_iter()
            .map(|l| DetectedLabel {
                description: l.description,
                score: l.score,
            })
            .collect())
    }
}

#[async_trait]
impl LabelDetector for VisionClient {
    async fn detect(&self, image: &[u8], targets: &[&str]) -> LabelMatch {
        match self.annotate(image).await {
            Ok(labels) => match_labels(&labels, targets),
            Err(e) => {
                tracing::error!("Label detection failed: {}", e);
                LabelMatch::none()
            }
        }
    }
}
