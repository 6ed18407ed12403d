//! Detection seam used by callers that only need a verdict.

use async_trait::async_trait;
use deepguard_models::{ClassificationResult, ImageFile};

use crate::error::DetectResult;

/// Something that can classify an image as real or manipulated.
///
/// Implementations perform exactly one attempt per call.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, image: &ImageFile) -> DetectResult<ClassificationResult>;
}
