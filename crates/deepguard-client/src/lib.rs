//! Client for the remote deepfake detection service.
//!
//! The service exposes a single `POST /detect` endpoint that accepts an
//! image as multipart form data and answers with a JSON verdict. This crate
//! owns that wire contract and classifies every way it can fail.

pub mod client;
pub mod detector;
pub mod error;

pub use client::{DetectClient, DetectClientConfig};
pub use detector::Detector;
pub use error::{DetectError, DetectResult};
