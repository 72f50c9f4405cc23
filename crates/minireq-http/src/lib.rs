//! minireq-http: one-shot blocking HTTP client
//!
//! Every call builds its own transfer context, drives a single blocking
//! request through reqwest and hands back a plain [`Response`] value.
//! Nothing is pooled or shared between calls.
//!
//! # Architecture
//!
//! - `Buffer`: growable sink the response body is streamed into
//! - `Request`: method, URL, headers, cookie and query parameters
//! - `Response`: status, reason, body text and elapsed time
//! - `Transfer`: the invoker tying them together
//!
//! ```ignore
//! let response = minireq_http::get_url("https://example.com/");
//! if response.is_ok() {
//!     println!("{} in {:.3}s", response.status_code, response.elapsed);
//! }
//! ```

pub mod buffer;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;

pub use buffer::{Buffer, BufferError};
pub use client::{get, get_url, request, Transfer};
pub use config::TransferConfig;
pub use error::{HttpError, HttpErrorCategory, HttpResult};
pub use request::{header_lines, Headers, Request};
pub use response::Response;

// Re-export shared types from minireq-common
pub use minireq_common::{decode, encode, DecodeError, HttpMethod, HttpResponseLike, HttpStatus};
