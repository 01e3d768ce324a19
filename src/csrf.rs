// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSRF cookie guard
//!
//! Makes sure the CSRF cookie exists before a mutating request. The common
//! case is a single synchronous cookie lookup; only a missing cookie or a
//! forced refresh costs a round trip to the CSRF endpoint.

use std::sync::Arc;

use reqwest::Method;

use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_CSRF_COOKIE_NAME, DEFAULT_CSRF_PATH};
use crate::error::{Error, Result};
use crate::http::{CookieStore, CredentialsMode, Transport, TransportRequest};

/// Ensures the CSRF cookie is present in the cookie store
#[derive(Clone)]
pub struct CsrfGuard {
    transport: Arc<dyn Transport>,
    cookies: Arc<dyn CookieStore>,
}

impl CsrfGuard {
    pub fn new(transport: Arc<dyn Transport>, cookies: Arc<dyn CookieStore>) -> Self {
        Self { transport, cookies }
    }

    /// On `Ok`, the cookie is expected to be in the store.
    ///
    /// With `fresh` set the endpoint is always hit, which rotates the token.
    pub async fn ensure_csrf_cookie(&self, config: &Config, fresh: bool) -> Result<()> {
        let cookie_name = non_empty(&config.csrf_cookie_name, DEFAULT_CSRF_COOKIE_NAME);

        let present = self
            .cookies
            .read_cookie(cookie_name)
            .is_some_and(|v| !v.is_empty());
        if !fresh && present {
            if config.debug {
                tracing::debug!(cookie = cookie_name, "CSRF cookie already exists");
            }
            return Ok(());
        }

        let url = csrf_url(config);
        if config.debug {
            tracing::debug!(url = %url, fresh, "fetching CSRF cookie");
        }

        // The endpoint must always exchange cookies, whatever the caller's mode
        let request = TransportRequest::new(Method::GET, CredentialsMode::Include);
        let response = self.transport.send(&url, request).await.map_err(|err| {
            if config.debug {
                tracing::error!(url = %url, error = %err, "CSRF fetch failed");
            }
            err
        })?;

        if !response.is_success() {
            let err = Error::csrf_fetch(response.status_code(), url);
            if config.debug {
                tracing::error!(error = %err, "CSRF fetch rejected");
            }
            return Err(err);
        }

        if config.debug {
            tracing::debug!(status = response.status_code(), "CSRF cookie fetched");
        }
        Ok(())
    }
}

/// Full URL of the CSRF endpoint for a configuration
pub fn csrf_url(config: &Config) -> String {
    let base = non_empty(&config.base_url, DEFAULT_BASE_URL).trim_end_matches('/');
    let path = non_empty(&config.csrf_path, DEFAULT_CSRF_PATH);
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Name of the request header carrying the CSRF token
pub fn csrf_header_name(cookie_name: &str) -> String {
    format!("X-{}", non_empty(cookie_name, DEFAULT_CSRF_COOKIE_NAME))
}

pub(crate) fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, StaticCookies};

    fn guard(transport: &Arc<MockTransport>, cookies: &Arc<StaticCookies>) -> CsrfGuard {
        CsrfGuard::new(transport.clone(), cookies.clone())
    }

    #[test]
    fn test_csrf_url() {
        let config = Config::default().base_url("https://api.test/");
        assert_eq!(csrf_url(&config), "https://api.test/sanctum/csrf-cookie");

        let config = Config::default().base_url("").csrf_path("csrf");
        assert_eq!(csrf_url(&config), "http://localhost:8000/csrf");
    }

    #[test]
    fn test_header_name_is_derived() {
        assert_eq!(csrf_header_name("XSRF-TOKEN"), "X-XSRF-TOKEN");
        assert_eq!(csrf_header_name("MY-CSRF"), "X-MY-CSRF");
        assert_eq!(csrf_header_name(""), "X-XSRF-TOKEN");
    }

    #[tokio::test]
    async fn test_existing_cookie_skips_network() {
        let transport = Arc::new(MockTransport::new());
        let cookies = Arc::new(StaticCookies::with("XSRF-TOKEN", "abc"));

        guard(&transport, &cookies)
            .ensure_csrf_cookie(&Config::default(), false)
            .await
            .unwrap();

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cookie_fetches_with_include() {
        let transport = Arc::new(MockTransport::new());
        let cookies = Arc::new(StaticCookies::default());
        let config = Config::default()
            .base_url("https://api.test")
            .credentials(CredentialsMode::Omit);

        guard(&transport, &cookies)
            .ensure_csrf_cookie(&config, false)
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://api.test/sanctum/csrf-cookie");
        assert_eq!(calls[0].request.method, Method::GET);
        assert_eq!(calls[0].request.credentials, CredentialsMode::Include);
    }

    #[test]
    fn test_fresh_always_fetches() {
        let transport = Arc::new(MockTransport::new());
        let cookies = Arc::new(StaticCookies::with("XSRF-TOKEN", "abc"));
        let guard = guard(&transport, &cookies);

        tokio_test::assert_ok!(tokio_test::block_on(
            guard.ensure_csrf_cookie(&Config::default(), true)
        ));

        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_empty_cookie_counts_as_missing() {
        let transport = Arc::new(MockTransport::new());
        let cookies = Arc::new(StaticCookies::with("XSRF-TOKEN", ""));
        let guard = guard(&transport, &cookies);

        tokio_test::assert_ok!(tokio_test::block_on(
            guard.ensure_csrf_cookie(&Config::default(), false)
        ));

        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_cookie_name_is_looked_up() {
        let transport = Arc::new(MockTransport::new());
        let cookies = Arc::new(StaticCookies::with("XSRF-TOKEN", "abc"));
        let config = Config::default().csrf_cookie_name("APP-XSRF");

        guard(&transport, &cookies)
            .ensure_csrf_cookie(&config, false)
            .await
            .unwrap();

        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let transport = Arc::new(MockTransport::new().respond("/sanctum/csrf-cookie", 500));
        let cookies = Arc::new(StaticCookies::default());

        let err = guard(&transport, &cookies)
            .ensure_csrf_cookie(&Config::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CsrfFetch { status: 500, .. }));
        assert_eq!(err.url(), Some("http://localhost:8000/sanctum/csrf-cookie"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = Arc::new(MockTransport::new().fail("/sanctum/csrf-cookie", "connection refused"));
        let cookies = Arc::new(StaticCookies::default());

        let err = guard(&transport, &cookies)
            .ensure_csrf_cookie(&Config::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(ref msg) if msg == "connection refused"));
    }
}
