//! HTTP error types and handling

use crate::buffer::BufferError;
use std::error::Error as _;
use thiserror::Error;

/// Errors raised while performing a transfer
#[derive(Error, Debug)]
pub enum HttpError {
    /// The transfer context could not be built
    #[error("failed to initialize transfer context")]
    Init(#[source] reqwest::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Header name or value rejected before sending
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Method the engine refused to represent
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// The response body could not be accumulated
    #[error("Response body error: {0}")]
    Buffer(#[from] BufferError),

    /// Reading the response body failed mid-stream
    #[error("Response read error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport error reported by reqwest
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorCategory {
    /// Context construction failed
    Init,
    /// Invalid request construction
    Request,
    /// Connection-related errors (DNS, TCP, TLS)
    Connection,
    /// Timeout errors
    Timeout,
    /// Body accumulation or read errors
    Body,
    /// Unknown/other errors
    Unknown,
}

impl HttpError {
    /// Categorize the error for reporting
    pub fn category(&self) -> HttpErrorCategory {
        match self {
            HttpError::Init(_) => HttpErrorCategory::Init,
            HttpError::InvalidUrl(_) | HttpError::InvalidHeader(_) | HttpError::InvalidMethod(_) => {
                HttpErrorCategory::Request
            }
            HttpError::Buffer(_) | HttpError::Io(_) => HttpErrorCategory::Body,
            HttpError::Reqwest(e) => {
                if e.is_connect() {
                    HttpErrorCategory::Connection
                } else if e.is_timeout() {
                    HttpErrorCategory::Timeout
                } else if e.is_body() || e.is_decode() {
                    HttpErrorCategory::Body
                } else if e.is_builder() || e.is_request() {
                    HttpErrorCategory::Request
                } else {
                    HttpErrorCategory::Unknown
                }
            }
        }
    }

    /// Human-readable reason including the chain of underlying causes.
    ///
    /// Initialization failures keep their fixed message so callers can match on it.
    pub fn describe(&self) -> String {
        if matches!(self, HttpError::Init(_)) {
            return self.to_string();
        }

        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }

    /// Sanitize error message (remove credentials and tokens)
    pub fn sanitized_message(&self) -> String {
        sanitize_error_message(&self.describe())
    }
}

/// Sanitize error messages by removing sensitive information
fn sanitize_error_message(msg: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static URL_CREDS_RE: OnceLock<Regex> = OnceLock::new();
    static AUTH_TOKEN_RE: OnceLock<Regex> = OnceLock::new();

    let url_creds_re = URL_CREDS_RE
        .get_or_init(|| Regex::new(r"(https?)://[^@/\s:]+:[^@/\s]+@").expect("valid regex"));
    let auth_token_re = AUTH_TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?i)(bearer|api[_-]?key|token)(\s*[:=]?\s*)[^\s&]+").expect("valid regex")
    });

    let sanitized = url_creds_re.replace_all(msg, "$1://[REDACTED]@");
    let sanitized = auth_token_re.replace_all(&sanitized, "$1$2[REDACTED]");

    sanitized.to_string()
}
