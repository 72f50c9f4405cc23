//! HTTP request types and builders

use crate::error::{HttpError, HttpResult};
use minireq_common::codec::encode_query;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use url::Url;

pub use minireq_common::http::HttpMethod;

/// Header mapping; iteration is ordered by name
pub type Headers = BTreeMap<String, String>;

/// Convert HttpMethod to reqwest Method
fn to_reqwest_method(method: HttpMethod) -> HttpResult<reqwest::Method> {
    if method.is_extension() {
        return reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|e| HttpError::InvalidMethod(format!("{}: {}", method, e)));
    }

    let converted = match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Trace => reqwest::Method::TRACE,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Lock | HttpMethod::Mkcol | HttpMethod::Copy | HttpMethod::Move => {
            unreachable!("extension methods return early")
        }
    };
    Ok(converted)
}

/// Render headers as `name:value` lines, in mapping order
pub fn header_lines(headers: &Headers) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect()
}

/// One outbound request
///
/// Files, body and auth are carried for callers that build requests
/// generically but are never sent.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL, used as given
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Cookie string (`name=value; other=value`)
    pub cookie: Option<String>,
    /// File uploads by field name
    pub files: BTreeMap<String, String>,
    /// Opaque body payload
    pub data: Option<Vec<u8>>,
    /// Query parameters, percent-encoded onto the URL
    pub params: BTreeMap<String, String>,
    /// Opaque authentication token
    pub auth: Option<String>,
}

impl Request {
    /// Create a new request
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            cookie: None,
            files: BTreeMap::new(),
            data: None,
            params: BTreeMap::new(),
            auth: None,
        }
    }

    /// Shorthand for a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add multiple headers
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the cookie string
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach a file upload (not transmitted)
    pub fn file(mut self, field: impl Into<String>, path: impl Into<String>) -> Self {
        self.files.insert(field.into(), path.into());
        self
    }

    /// Attach a body payload (not transmitted)
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Attach an auth token (not transmitted)
    pub fn auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    /// Header lines in the order they will be sent
    pub fn header_lines(&self) -> Vec<String> {
        header_lines(&self.headers)
    }

    /// Cookie string if one is set and non-empty
    pub fn effective_cookie(&self) -> Option<&str> {
        self.cookie.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Names of the populated fields that the transfer will not send
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.files.is_empty() {
            fields.push("files");
        }
        if self.data.is_some() {
            fields.push("data");
        }
        if self.auth.is_some() {
            fields.push("auth");
        }
        fields
    }

    /// Parse the URL and append the encoded query parameters.
    ///
    /// The URL itself is never re-encoded.
    pub fn full_url(&self) -> HttpResult<Url> {
        let mut url = Url::parse(&self.url)?;

        if !self.params.is_empty() {
            let encoded = encode_query(
                self.params
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
                _ => encoded,
            };
            url.set_query(Some(&query));
        }

        Ok(url)
    }

    pub(crate) fn reqwest_method(&self) -> HttpResult<reqwest::Method> {
        to_reqwest_method(self.method)
    }

    pub(crate) fn header_map(&self) -> HttpResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| HttpError::InvalidHeader(format!("{}: {}", name, e)))?;
            // Names differing only in case stay separate lines
            map.append(header_name, header_value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = Request::get("http://example.com/api")
            .header("X-Custom", "value")
            .cookie("session=abc")
            .param("page", "1");

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://example.com/api");
        assert!(request.headers.contains_key("X-Custom"));
        assert_eq!(request.effective_cookie(), Some("session=abc"));
        assert!(request.ignored_fields().is_empty());
    }

    #[test]
    fn test_header_lines_single_entry_per_key() {
        let request = Request::get("http://example.com/")
            .header("X-Test", "0")
            .header("X-Test", "1")
            .header("Accept", "text/plain");

        assert_eq!(request.header_lines(), vec!["Accept:text/plain", "X-Test:1"]);
    }

    #[test]
    fn test_full_url_encodes_params_only() {
        let request = Request::get("http://example.com/search?lang=en")
            .param("q", "rust lang")
            .param("tag", "a&b");

        let url = request.full_url().unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/search?lang=en&q=rust+lang&tag=a%26b"
        );
    }

    #[test]
    fn test_full_url_left_untouched_without_params() {
        let request = Request::get("http://example.com/a%20b?x=1");
        assert_eq!(request.full_url().unwrap().as_str(), "http://example.com/a%20b?x=1");
    }

    #[test]
    fn test_full_url_rejects_garbage() {
        let err = Request::get("::not a url::").full_url().unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl(_)));
    }

    #[test]
    fn test_empty_cookie_is_ignored() {
        assert_eq!(Request::get("http://x/").cookie("  ").effective_cookie(), None);
    }

    #[test]
    fn test_ignored_fields() {
        let request = Request::new(HttpMethod::Post, "http://example.com/upload")
            .file("avatar", "/tmp/a.png")
            .data(b"payload".to_vec())
            .auth("secret");

        assert_eq!(request.ignored_fields(), vec!["files", "data", "auth"]);
    }

    #[test]
    fn test_extension_methods_convert() {
        for method in [HttpMethod::Lock, HttpMethod::Mkcol, HttpMethod::Copy, HttpMethod::Move] {
            let converted = Request::new(method, "http://x/").reqwest_method().unwrap();
            assert_eq!(converted.as_str(), method.as_str());
        }
        let trace = Request::new(HttpMethod::Trace, "http://x/").reqwest_method().unwrap();
        assert_eq!(trace, reqwest::Method::TRACE);
    }

    #[test]
    fn test_header_map_keeps_case_variants() {
        let request = Request::get("http://x/")
            .header("X-Dup", "a")
            .header("x-dup", "b");

        assert_eq!(request.header_lines().len(), 2);
        let map = request.header_map().unwrap();
        let values: Vec<_> = map.get_all("x-dup").iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_header_map_rejects_bad_names() {
        let request = Request::get("http://x/").header("Bad Header", "v");
        assert!(matches!(request.header_map(), Err(HttpError::InvalidHeader(_))));

        let request = Request::get("http://x/").header("X-Ok", "line\nbreak");
        assert!(matches!(request.header_map(), Err(HttpError::InvalidHeader(_))));
    }
}
