//! Growable sink for response bodies.
//!
//! The body is delivered in chunks; each chunk is appended with a fallible
//! reservation so allocation failure surfaces as an error instead of a
//! silently shortened body.

use crate::error::HttpResult;
use std::borrow::Cow;
use std::io::{ErrorKind, Read};
use thiserror::Error;

/// Reasons a chunk could not be appended
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("out of memory growing response buffer to {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("response body exceeds limit of {limit} bytes")]
    LimitExceeded { limit: usize },
}

/// Accumulates the chunks of a single response body
#[derive(Debug, Default)]
pub struct Buffer {
    data: Vec<u8>,
    limit: Option<usize>,
}

impl Buffer {
    /// Create an unbounded buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer that refuses to grow past `limit` bytes
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Append one chunk, returning the number of bytes taken.
    pub fn append(&mut self, chunk: &[u8]) -> Result<usize, BufferError> {
        let requested = self
            .data
            .len()
            .checked_add(chunk.len())
            .ok_or(BufferError::OutOfMemory { requested: usize::MAX })?;

        if let Some(limit) = self.limit {
            if requested > limit {
                return Err(BufferError::LimitExceeded { limit });
            }
        }

        self.data
            .try_reserve(chunk.len())
            .map_err(|_| BufferError::OutOfMemory { requested })?;
        self.data.extend_from_slice(chunk);

        Ok(chunk.len())
    }

    /// Drain `reader` into the buffer `chunk_size` bytes at a time.
    ///
    /// Returns the total number of bytes appended.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R, chunk_size: usize) -> HttpResult<usize> {
        let mut chunk = vec![0u8; chunk_size.max(1)];
        let mut total = 0;

        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            total += self.append(&chunk[..read])?;
        }

        Ok(total)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Body as text, replacing invalid UTF-8 sequences
    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
