//! Shared HTTP types for minireq.

use std::fmt;
use std::str::FromStr;

/// HTTP request methods, including the WebDAV verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Trace,
    Options,
    Lock,
    Mkcol,
    Copy,
    Move,
}

impl HttpMethod {
    /// Returns the method as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Trace => "TRACE",
            Self::Options => "OPTIONS",
            Self::Lock => "LOCK",
            Self::Mkcol => "MKCOL",
            Self::Copy => "COPY",
            Self::Move => "MOVE",
        }
    }

    /// Returns true for the WebDAV extension methods.
    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Lock | Self::Mkcol | Self::Copy | Self::Move)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "TRACE" => Ok(Self::Trace),
            "OPTIONS" => Ok(Self::Options),
            "LOCK" => Ok(Self::Lock),
            "MKCOL" => Ok(Self::Mkcol),
            "COPY" => Ok(Self::Copy),
            "MOVE" => Ok(Self::Move),
            _ => Err(format!("Invalid HTTP method: {}", s)),
        }
    }
}

/// HTTP status code wrapper with helper methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus(pub u16);

impl HttpStatus {
    pub const OK: Self = Self(200);
    pub const NOT_FOUND: Self = Self(404);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Interpret a raw status integer. Returns `None` for the `-1` sentinel
    /// and anything outside `100..=999`.
    pub fn from_raw(code: i32) -> Option<Self> {
        u16::try_from(code)
            .ok()
            .filter(|c| (100..1000).contains(c))
            .map(Self)
    }

    /// Returns true if this is a success status (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// Returns true if this is a client error status (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// Returns true if this is a server error status (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }
}

/// Trait for types that represent a finished HTTP exchange.
pub trait HttpResponseLike {
    /// Returns the raw status code, `-1` when none was received.
    fn status_code(&self) -> i32;

    /// Returns the HTTP status, if one was received.
    fn status(&self) -> Option<HttpStatus> {
        HttpStatus::from_raw(self.status_code())
    }

    /// Returns true if this is a success response (2xx).
    fn is_success(&self) -> bool {
        self.status().is_some_and(|s| s.is_success())
    }

    /// Returns true if this is a client error response (4xx).
    fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// Returns true if this is a server error response (5xx).
    fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}
