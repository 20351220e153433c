// src/error.rs
//! Error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the client.
//! Callers branch on [`ClientError::code`] and [`ClientError::status`]
//! rather than on message strings.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Machine-readable failure codes as a typed vocabulary.
///
/// The textual form (`HTTP_404`, `TIMEOUT`, ...) is what [`fmt::Display`]
/// produces and what callers see when errors are serialized or logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The server answered with a non-2xx status.
    Http(u16),
    /// The overall request deadline elapsed.
    Timeout,
    /// Every attempt failed with a retryable error.
    MaxRetriesExceeded,
    /// The response body did not have the expected shape.
    InvalidResponse,
    /// Parent references in a listing form a cycle.
    CycleDetected,
    /// The same item id appears twice in one listing.
    DuplicateId,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP_{}", status),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::MaxRetriesExceeded => write!(f, "MAX_RETRIES_EXCEEDED"),
            Self::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            Self::CycleDetected => write!(f, "CYCLE_DETECTED"),
            Self::DuplicateId => write!(f, "DUPLICATE_ID"),
        }
    }
}

/// The error every content operation fails with.
///
/// `status` is only ever set for [`ErrorCode::Http`]; the constructors are
/// the only way to build one, which keeps that pairing intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    status: Option<u16>,
    code: ErrorCode,
}

impl ClientError {
    /// An error for a received non-2xx response.
    ///
    /// The body is appended to the message (truncated) when non-empty.
    pub fn http(status: u16, reason: &str, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {}: {}", status, reason)
        } else {
            format!("HTTP {}: {} - {}", status, reason, preview(body))
        };
        Self {
            message,
            status: Some(status),
            code: ErrorCode::Http(status),
        }
    }

    pub fn timeout() -> Self {
        Self {
            message: "Request timeout".to_string(),
            status: None,
            code: ErrorCode::Timeout,
        }
    }

    /// Raised once every attempt is spent; embeds the attempt count and
    /// the last failure seen.
    pub fn max_retries_exceeded(attempts: u32, last_failure: &str) -> Self {
        Self {
            message: format!("Failed after {} attempts: {}", attempts, last_failure),
            status: None,
            code: ErrorCode::MaxRetriesExceeded,
        }
    }

    pub fn invalid_response(detail: impl fmt::Display) -> Self {
        Self {
            message: format!("Malformed response: {}", detail),
            status: None,
            code: ErrorCode::InvalidResponse,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Whether the server said the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Whether another attempt could succeed: server-side failures only.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status, Some(status) if status >= 500)
    }
}

impl From<TreeError> for ClientError {
    fn from(err: TreeError) -> Self {
        let code = match err {
            TreeError::Cycle { .. } => ErrorCode::CycleDetected,
            TreeError::DuplicateId { .. } => ErrorCode::DuplicateId,
        };
        Self {
            message: err.to_string(),
            status: None,
            code,
        }
    }
}

/// Cuts a response body down to a loggable size on a char boundary.
fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Failure of a single transport round-trip. Never leaves the fetcher on
/// its own: it is retried and folded into [`ErrorCode::MaxRetriesExceeded`].
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

/// Structural problems found while nesting a flat listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Cycle detected in parent references at item {id}")]
    Cycle { id: u64 },

    #[error("Item id {id} appears more than once in the listing")]
    DuplicateId { id: u64 },
}

/// Problems with the client configuration, caught at construction time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration: organization slug cannot be empty")]
    EmptyOrganization,

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Retry count must be at least one attempt")]
    ZeroAttempts,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Config file not readable at {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON parse error for {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
