//! Shared data models for the DeepGuard client.
//!
//! This crate provides Serde-serializable types for:
//! - Image files chosen by the user and their preview handles
//! - Classification results returned by the detection service
//! - Display rules for verdicts and confidence scores

pub mod classification;
pub mod error;
pub mod image;

// Re-export common types
pub use classification::{ClassificationResult, Prediction, Tone};
pub use error::{ModelError, ModelResult};
pub use image::{is_image_media_type, ImageFile, PreviewHandle, SelectedImage};
