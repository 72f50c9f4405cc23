//! HTTP response types

use minireq_common::http::HttpResponseLike;
use serde::Serialize;
use std::time::Duration;

/// Status code of a response that never received one
pub const NO_STATUS: i32 = -1;

/// Outcome of one transfer
///
/// `status_code` is [`NO_STATUS`] until the server answered. `reason` is
/// empty on success and holds the failure description otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// URL the request was made for
    pub url: String,

    /// HTTP status code, `-1` if none was received
    pub status_code: i32,

    /// Failure description, empty on success
    pub reason: String,

    /// Response body as text
    pub content: String,

    /// Wall time of the transfer in seconds
    pub elapsed: f64,
}

impl Response {
    /// Create an empty response for `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: NO_STATUS,
            reason: String::new(),
            content: String::new(),
            elapsed: 0.0,
        }
    }

    /// Body text
    pub fn text(&self) -> &str {
        &self.content
    }

    /// True when a status was received and no error was recorded
    pub fn is_ok(&self) -> bool {
        self.reason.is_empty() && self.status_code != NO_STATUS
    }

    /// Elapsed time as a Duration; zero if `elapsed` is not a valid duration
    pub fn elapsed_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.elapsed).unwrap_or_default()
    }
}

impl HttpResponseLike for Response {
    fn status_code(&self) -> i32 {
        self.status_code
    }
}
