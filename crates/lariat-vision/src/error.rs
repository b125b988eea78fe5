//! Error types for the image label demo.

use thiserror::Error;

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The source image could not be fetched.
    #[error("image fetch failed: {0}")]
    Fetch(String),

    /// The annotation call failed or returned an error status.
    #[error("annotation failed: {0}")]
    Annotate(String),
}
