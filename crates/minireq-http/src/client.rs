//! One-shot blocking transfers

use crate::buffer::Buffer;
use crate::config::TransferConfig;
use crate::error::{HttpError, HttpResult};
use crate::request::{Headers, Request};
use crate::response::Response;
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Drives single blocking requests
///
/// Holds configuration only; every call builds and drops its own
/// transfer context, so a `Transfer` can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use minireq_http::{Transfer, TransferConfig, Request};
///
/// let transfer = Transfer::with_config(TransferConfig::new().max_body_bytes(1 << 20));
/// let response = transfer.request(&Request::get("https://example.com/").param("q", "rust"));
/// println!("{} {}", response.status_code, response.text());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Transfer {
    config: TransferConfig,
}

impl Transfer {
    /// Create a transfer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transfer with the given configuration
    pub fn with_config(config: TransferConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// GET `url` with the given headers and cookie (empty means none)
    pub fn get(&self, url: &str, headers: &Headers, cookie: &str) -> Response {
        let request = Request::get(url).headers(headers.clone()).cookie(cookie);
        self.request(&request)
    }

    /// GET `url` without headers or cookie
    pub fn get_url(&self, url: &str) -> Response {
        self.request(&Request::get(url))
    }

    /// Perform `request` and report the outcome.
    ///
    /// Never fails: errors end up in [`Response::reason`].
    pub fn request(&self, request: &Request) -> Response {
        let mut response = Response::new(request.url.as_str());
        let start = Instant::now();

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            headers = ?request.header_lines(),
            "Starting transfer"
        );

        let ignored = request.ignored_fields();
        if !ignored.is_empty() {
            tracing::warn!(fields = ?ignored, "Request fields are not transmitted and were ignored");
        }

        let outcome = self.perform(request, &mut response);
        response.elapsed = start.elapsed().as_secs_f64();

        match outcome {
            Ok(bytes) => {
                tracing::info!(
                    method = %request.method,
                    status = response.status_code,
                    bytes,
                    elapsed = response.elapsed,
                    "Transfer complete"
                );
            }
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    category = ?e.category(),
                    status = response.status_code,
                    error = %e.sanitized_message(),
                    "Transfer failed"
                );
                response.reason = e.describe();
            }
        }

        response
    }

    /// Build a fresh context with its own cookie jar
    fn init_context(&self, jar: Arc<Jar>) -> HttpResult<Client> {
        Client::builder()
            .user_agent(&self.config.user_agent)
            .gzip(self.config.gzip)
            .cookie_provider(jar)
            .build()
            .map_err(HttpError::Init)
    }

    /// Returns the number of body bytes accumulated
    fn perform(&self, request: &Request, response: &mut Response) -> HttpResult<usize> {
        let jar = Arc::new(Jar::default());
        let client = self.init_context(jar.clone())?;

        let url = request.full_url()?;
        let method = request.reqwest_method()?;
        let headers = request.header_map()?;

        if let Some(cookie) = request.effective_cookie() {
            install_cookies(&jar, cookie, &url);
        }

        let mut http_response = client.request(method, url).headers(headers).send()?;
        response.status_code = i32::from(http_response.status().as_u16());

        let mut buffer = Buffer::with_limit(self.config.max_body_bytes);
        let bytes = buffer.fill_from(&mut http_response, self.config.read_chunk_size)?;

        if !buffer.is_empty() {
            response.content = buffer.as_text().into_owned();
        }

        Ok(bytes)
    }
}

/// Add each `name=value` pair of a cookie string to the jar for `url`
fn install_cookies(jar: &Jar, cookie: &str, url: &Url) {
    for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        jar.add_cookie_str(pair, url);
    }
}

/// GET `url` with headers and cookie using the default configuration
pub fn get(url: &str, headers: &Headers, cookie: &str) -> Response {
    Transfer::new().get(url, headers, cookie)
}

/// GET `url` using the default configuration
pub fn get_url(url: &str) -> Response {
    Transfer::new().get_url(url)
}

/// Perform `request` using the default configuration
pub fn request(request: &Request) -> Response {
    Transfer::new().request(request)
}
