//! Error types for the data-modeling client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The split that matters to callers is [`Error::is_transient`]: transient
//! failures are retried by the fetch envelope and mean "try again later",
//! everything else means "fix your request".

use serde_json::Value;
use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Errors
    // ============================================================================
    /// The service reported a condition expected to clear on retry
    #[error("Transient API error (HTTP {status}): {message}")]
    TransientApi { status: u16, message: String },

    /// The service rejected the request; retrying will not help
    #[error("API error (HTTP {status}): {message}")]
    ClientApi { status: u16, message: String },

    /// The response did not have the shape the API contract promises
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Concurrency Errors
    // ============================================================================
    #[error("Multiple operations failed: {first}; {second}")]
    Multiple {
        first: Box<Error>,
        second: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Classify a non-2xx response into a transient or client error
    ///
    /// `body` is the raw response text. When it carries the service's
    /// `{"error": {"message": ...}}` envelope the inner message is used.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body);
        if is_transient_status(status) {
            Self::TransientApi { status, message }
        } else {
            Self::ClientApi { status, message }
        }
    }

    /// HTTP status carried by an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::TransientApi { status, .. } | Error::ClientApi { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Error::TransientApi { .. } => true,
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Check if an HTTP status code indicates a transient condition
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429) || (500..600).contains(&status)
}

/// Pull the human-readable message out of an API error body
fn extract_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| match e {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("message").and_then(Value::as_str).map(String::from),
            _ => None,
        })
        .unwrap_or_else(|| body.to_string())
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
