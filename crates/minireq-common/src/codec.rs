//! Percent-encoding for URL components.
//!
//! Unreserved bytes (ASCII alphanumerics and `: / ? = - _ . ~`) pass through,
//! a space becomes `+`, and every other byte is written as `%XY` with
//! uppercase hex digits.

use thiserror::Error;

/// Errors returned by [`decode`] and [`decode_bytes`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` without two characters after it
    #[error("truncated escape sequence at byte {position}")]
    Truncated { position: usize },

    /// A `%` followed by something other than two hex digits
    #[error("invalid escape sequence at byte {position}")]
    InvalidHex { position: usize },

    /// The decoded bytes are not valid UTF-8
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'/' | b'?' | b'=' | b'-' | b'_' | b'.' | b'~')
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a string.
///
/// Non-ASCII characters are escaped byte by byte from their UTF-8 form.
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else if b == b' ' {
            out.push('+');
        } else {
            out.push('%');
            out.push(HEX_UPPER[(b >> 4) as usize] as char);
            out.push(HEX_UPPER[(b & 0x0F) as usize] as char);
        }
    }
    out
}

/// Decode a percent-encoded string into raw bytes.
pub fn decode_bytes(input: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(DecodeError::Truncated { position: i });
                }
                let high = hex_value(bytes[i + 1]);
                let low = hex_value(bytes[i + 2]);
                match (high, low) {
                    (Some(h), Some(l)) => out.push(h * 16 + l),
                    _ => return Err(DecodeError::InvalidHex { position: i }),
                }
                i += 2;
            }
            other => out.push(other),
        }
        i += 1;
    }

    Ok(out)
}

/// Decode a percent-encoded string.
pub fn decode(input: &str) -> Result<String, DecodeError> {
    let bytes = decode_bytes(input)?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

/// Encode one `name=value` pair.
pub fn encode_pair(name: &str, value: &str) -> String {
    format!("{}={}", encode(name), encode(value))
}

/// Encode a sequence of pairs as a query string (without the leading `?`).
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| encode_pair(name, value))
        .collect::<Vec<_>>()
        .join("&")
}
