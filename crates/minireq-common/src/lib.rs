//! Common utilities for minireq
//!
//! This crate provides the pieces shared by the client and the CLI:
//! the percent codec and the HTTP method/status types.

pub mod codec;
pub mod http;

pub use codec::{decode, decode_bytes, encode, encode_pair, encode_query, DecodeError};
pub use http::{HttpMethod, HttpResponseLike, HttpStatus};
