//! Detection service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use deepguard_models::{ClassificationResult, ImageFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::{debug, error, info};

use crate::detector::Detector;
use crate::error::{DetectError, DetectResult};

/// Path of the detection endpoint, relative to the base URL.
pub const DETECT_PATH: &str = "/detect";

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for the detection client.
#[derive(Debug, Clone)]
pub struct DetectClientConfig {
    /// Base URL of the detection service
    pub base_url: String,
    /// Request timeout; `None` waits for as long as the service takes
    pub timeout: Option<Duration>,
}

impl Default for DetectClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl DetectClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DEEPGUARD_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: std::env::var("DEEPGUARD_API_TIMEOUT")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the detection endpoint.
    pub fn endpoint(&self) -> DetectResult<Url> {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{}{}", base, DETECT_PATH);
        Url::parse(&url)
            .map_err(|e| DetectError::Config(format!("invalid base URL {:?}: {}", self.base_url, e)))
    }
}

/// Client for the detection service.
pub struct DetectClient {
    http: Client,
    endpoint: Url,
}

impl DetectClient {
    /// Create a new detection client.
    pub fn new(config: DetectClientConfig) -> DetectResult<Self> {
        let endpoint = config.endpoint()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| DetectError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, endpoint })
    }

    /// Create from environment variables.
    pub fn from_env() -> DetectResult<Self> {
        Self::new(DetectClientConfig::from_env())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit an image and parse the verdict.
    ///
    /// Exactly one request is issued. A non-success status becomes
    /// [`DetectError::Server`] after the body has been read for logging.
    pub async fn classify(&self, image: &ImageFile) -> DetectResult<ClassificationResult> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.media_type())
            .map_err(DetectError::Request)?;
        let form = Form::new().part(FILE_FIELD, part);

        debug!(
            file_name = %image.file_name(),
            media_type = %image.media_type(),
            size = image.len(),
            "Submitting image to {}",
            self.endpoint
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(DetectError::from_send)?;

        let status = response.status();
        info!(status = status.as_u16(), "Detection service responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Detection service returned an error");
            return Err(DetectError::Server {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body = response.bytes().await.map_err(DetectError::Request)?;
        let result: ClassificationResult = serde_json::from_slice(&body)?;
        result.validate()?;

        info!(
            prediction = %result.prediction,
            confidence = result.confidence,
            "Detection completed"
        );
        Ok(result)
    }
}

#[async_trait]
impl Detector for DetectClient {
    async fn detect(&self, image: &ImageFile) -> DetectResult<ClassificationResult> {
        self.classify(image).await
    }
}
