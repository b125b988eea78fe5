//! Annotation request shapes for the label detection call.

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

/// Feature kind requested for every image in the demo.
pub const LABEL_DETECTION: &str = "LABEL_DETECTION";

/// Top-level annotate payload: a batch of image requests.
#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<ImageRequest>,
}

/// One image plus the features to detect on it.
#[derive(Debug, Serialize)]
pub struct ImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

/// Inline image bytes, base64-encoded.
#[derive(Debug, Serialize)]
pub struct ImageContent {
    pub content: String,
}

/// A single detection feature.
#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
}

impl AnnotateRequest {
    /// Build a single-image request asking for label detection.
    pub fn label_detection(image: &[u8]) -> Self {
        Self {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: LABEL_DETECTION.to_string(),
                }],
            }],
        }
    }
}
