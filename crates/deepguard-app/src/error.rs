//! User-facing error types.

use std::fmt;

use deepguard_client::DetectError;
use serde::Serialize;
use thiserror::Error;

pub const INVALID_FILE_MESSAGE: &str = "Please upload an image file";
pub const NO_IMAGE_MESSAGE: &str = "Please select an image first";
pub const NETWORK_MESSAGE: &str =
    "Network error: Unable to connect to the API. Please check your internet connection and try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

pub type SessionResult<T> = Result<T, SessionError>;

/// Rejections raised by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please upload an image file")]
    InvalidMediaType { media_type: String },

    #[error("Please select an image first")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,
}

impl SessionError {
    /// The error state this rejection leaves behind, if any.
    ///
    /// A submit while analyzing is ignored rather than reported.
    pub fn error_state(&self) -> Option<ErrorState> {
        match self {
            SessionError::InvalidMediaType { .. } => Some(ErrorState::validation()),
            SessionError::NoImageSelected => Some(ErrorState::missing_input()),
            SessionError::AnalysisInProgress => None,
        }
    }
}

/// Category of the last failure shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    MissingInput,
    Network,
    Server,
    Unknown,
}

/// Human-readable description of the last failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorState {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation() -> Self {
        Self::new(ErrorKind::Validation, INVALID_FILE_MESSAGE)
    }

    pub fn missing_input() -> Self {
        Self::new(ErrorKind::MissingInput, NO_IMAGE_MESSAGE)
    }

    pub fn network() -> Self {
        Self::new(ErrorKind::Network, NETWORK_MESSAGE)
    }

    /// Unknown failure, using the error text when there is any.
    pub fn unknown(detail: impl fmt::Display) -> Self {
        let detail = detail.to_string();
        if detail.trim().is_empty() {
            Self::new(ErrorKind::Unknown, UNEXPECTED_MESSAGE)
        } else {
            Self::new(ErrorKind::Unknown, format!("Error: {}", detail))
        }
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&DetectError> for ErrorState {
    fn from(err: &DetectError) -> Self {
        match err {
            DetectError::Network(_) => ErrorState::network(),
            DetectError::Server { .. } => ErrorState::new(ErrorKind::Server, format!("Error: {}", err)),
            DetectError::InvalidResponse(_) | DetectError::Request(_) | DetectError::Config(_) => {
                ErrorState::unknown(err)
            }
        }
    }
}

impl From<DetectError> for ErrorState {
    fn from(err: DetectError) -> Self {
        ErrorState::from(&err)
    }
}
