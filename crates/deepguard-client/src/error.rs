//! Detection client error types.

use thiserror::Error;

pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, Error)]
pub enum DetectError {
    /// The service could not be reached (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API Error: {status}{}", reason_suffix(.status_text))]
    Server {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other transport failure during the request/response cycle.
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// " <reason>" for a non-empty reason phrase, nothing otherwise.
fn reason_suffix(status_text: &str) -> String {
    let reason = status_text.trim();
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {}", reason)
    }
}

impl DetectError {
    /// Classify a transport error raised while sending a request.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            DetectError::Network(err)
        } else {
            DetectError::Request(err)
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, DetectError::Network(_))
    }

    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            DetectError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DetectError {
    fn from(err: serde_json::Error) -> Self {
        DetectError::InvalidResponse(err.to_string())
    }
}

impl From<deepguard_models::ModelError> for DetectError {
    fn from(err: deepguard_models::ModelError) -> Self {
        DetectError::InvalidResponse(err.to_string())
    }
}
