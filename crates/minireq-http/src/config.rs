//! Transfer configuration

/// Settings applied to each freshly built transfer context
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// User-Agent header value
    pub user_agent: String,

    /// Upper bound on the accumulated body; `None` means unbounded
    pub max_body_bytes: Option<usize>,

    /// Size of each chunk read from the response body
    pub read_chunk_size: usize,

    /// Enable gzip decompression
    pub gzip: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("minireq/{}", env!("CARGO_PKG_VERSION")),
            max_body_bytes: None,
            read_chunk_size: 16 * 1024,
            gzip: true,
        }
    }
}

impl TransferConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Cap the response body size
    pub fn max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = Some(max);
        self
    }

    /// Set the body read chunk size (at least one byte)
    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    /// Enable/disable gzip decompression
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }
}
