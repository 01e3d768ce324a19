// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// HTTP response as returned by a [`Transport`](super::Transport).
///
/// The dispatcher only looks at `status`; everything else is handed back
/// to the caller untouched.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Whether this was a redirect
    pub redirected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        redirected: bool,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            redirected,
            response_time_ms,
        }
    }

    /// Minimal response with an empty body, handy for custom transports
    pub fn from_status(status: StatusCode, url: Url) -> Self {
        Self::new(status, HeaderMap::new(), Bytes::new(), url, false, 0)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all("set-cookie")
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_response_status() {
        let resp = Response::from_status(
            StatusCode::from_u16(419).unwrap(),
            Url::parse("https://api.test/users").unwrap(),
        );
        assert!(!resp.is_success());
        assert_eq!(resp.status_code(), 419);
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_set_cookies() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("XSRF-TOKEN=abc; Path=/"));
        headers.append("set-cookie", HeaderValue::from_static("session=xyz; HttpOnly"));
        let resp = Response::new(
            StatusCode::NO_CONTENT,
            headers,
            Bytes::new(),
            Url::parse("https://api.test/sanctum/csrf-cookie").unwrap(),
            false,
            12,
        );
        assert_eq!(resp.set_cookies().len(), 2);
        assert_eq!(resp.text_lossy(), "");
    }
}
