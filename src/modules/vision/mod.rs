//! Label detection for uploaded report images.
//!
//! [`LabelDetector::detect`] never fails: any problem talking to the
//! label-detection API is logged and reported as [`LabelMatch::none`].

mod vision_client;

use async_trait::async_trait;

pub use vision_client::VisionClient;

/// Maximum number of labels inspected per image
pub const MAX_LABELS: usize = 10;

/// Outcome of checking an image against a target vocabulary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMatch {
    pub matched: bool,
    pub score: f64,
}

impl LabelMatch {
    pub fn none() -> Self {
        Self {
            matched: false,
            score: 0.0,
        }
    }
}

/// A label returned by the detection API
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLabel {
    pub description: String,
    pub score: f64,
}

#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Check `image` against `targets` (lower-case vocabulary)
    async fn detect(&self, image: &[u8], targets: &[&str]) -> LabelMatch;
}

/// First of the top [`MAX_LABELS`] labels whose lower-cased description is a target
pub fn match_labels(labels: &[DetectedLabel], targets: &[&str]) -> LabelMatch {
    labels
        .iter()
        .take(MAX_LABELS)
        .find(|label| {
            let description = label.description.to_lowercase();
            targets.iter().any(|t| *t == description)
        })
        .map(|label| LabelMatch {
            matched: true,
            score: label.score,
        })
        .unwrap_or_else(LabelMatch::none)
}
