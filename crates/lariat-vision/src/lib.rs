//! lariat-vision — image label demo runner.
//!
//! Fetches a remote image, wraps it in a label-detection annotation
//! request, posts it to the configured annotation service, and logs the
//! response body verbatim.

pub mod annotate;
pub mod demo;
pub mod error;

pub use annotate::AnnotateRequest;
pub use demo::ImageLabelDemo;
pub use error::{VisionError, VisionResult};
