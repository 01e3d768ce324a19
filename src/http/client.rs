// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request dispatcher
//!
//! Header precedence, lowest to highest: configured default headers, the
//! `X-<cookie name>` CSRF token, per-request headers, override headers.
//! Credentials precedence: override, request options, configuration.
//! `SameOrigin` is judged against the effective base URL of each call.

use std::sync::Arc;

use reqwest::Method;

use super::cookie::{CookieJar, CookieStore};
use super::headers::{merge_headers, parse_header, CONTENT_TYPE};
use super::request::RequestOptions;
use super::response::Response;
use super::transport::{ReqwestTransport, Transport, TransportConfig, TransportRequest};
use super::{is_mutating, TOKEN_EXPIRED_STATUS};
use crate::config::{
    Config, ConfigOverride, ConfigStore, DEFAULT_BASE_URL, DEFAULT_CSRF_COOKIE_NAME,
};
use crate::csrf::{csrf_header_name, non_empty, CsrfGuard};
use crate::error::{Error, Result};
use crate::normalize::normalize;

/// HTTP client that performs the CSRF handshake before mutating requests
#[derive(Clone)]
pub struct Client {
    config: ConfigStore,
    cookies: Arc<dyn CookieStore>,
    transport: Arc<dyn Transport>,
    guard: CsrfGuard,
}

impl Client {
    /// Create a client backed by reqwest and a fresh cookie jar
    pub fn new(config: Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Shallow-merge `patch` into this client's configuration
    pub fn configure(&self, patch: &ConfigOverride) {
        self.config.configure(patch);
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.config.snapshot()
    }

    /// Force a CSRF cookie refresh
    pub async fn get_csrf_token(&self, overrides: &ConfigOverride) -> Result<()> {
        let effective = self.config.effective(overrides);
        self.guard.ensure_csrf_cookie(&effective, true).await
    }

    /// Execute a GET request
    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        self.send_verb("GET", path, options, overrides).await
    }

    /// Execute a POST request
    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        self.send_verb("POST", path, options, overrides).await
    }

    /// Execute a PUT request
    pub async fn put(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        self.send_verb("PUT", path, options, overrides).await
    }

    /// Execute a PATCH request
    pub async fn patch(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        self.send_verb("PATCH", path, options, overrides).await
    }

    /// Execute a DELETE request
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        self.send_verb("DELETE", path, options, overrides).await
    }

    async fn send_verb(
        &self,
        verb: &str,
        path: &str,
        mut options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        let normalized = normalize(
            verb,
            options.body.take(),
            std::mem::take(&mut options.headers),
        );
        options.method = Some(normalized.method);
        options.body = normalized.body;
        options.headers = normalized.headers;

        self.request(path, options, overrides).await
    }

    /// Execute a request without body normalization.
    ///
    /// A 419 answer schedules a forced CSRF refresh in the background and is
    /// still returned as-is; the request is not resent.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
        overrides: &ConfigOverride,
    ) -> Result<Response> {
        let base = self.config.snapshot();
        let effective = base.merged(overrides);
        let debug = effective.debug;

        if debug && overrides.base_url.is_none() {
            tracing::debug!(base_url = %effective.base_url, "no host override, using configured base URL");
        }

        let base_url = non_empty(&effective.base_url, DEFAULT_BASE_URL);
        let url = compose_url(base_url, path, &options.query);

        let method_name = options.normalized_method();
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|_| Error::InvalidMethod(method_name.clone()))?;
        let needs_csrf = is_mutating(&method_name);

        if needs_csrf {
            self.guard
                .ensure_csrf_cookie(&effective, overrides.fresh)
                .await?;
        }

        let mut headers = base.default_headers.clone();
        if needs_csrf {
            let cookie_name = non_empty(&effective.csrf_cookie_name, DEFAULT_CSRF_COOKIE_NAME);
            match self.cookies.read_cookie(cookie_name).filter(|v| !v.is_empty()) {
                Some(raw) => {
                    let (name, value) =
                        parse_header(&csrf_header_name(cookie_name), &decode_uri_component(&raw))?;
                    headers.insert(name, value);
                }
                None if debug => {
                    tracing::warn!(cookie = cookie_name, "CSRF cookie missing, sending without token")
                }
                None => {}
            }
        }
        merge_headers(&mut headers, &options.headers);
        if let Some(ref override_headers) = overrides.default_headers {
            merge_headers(&mut headers, override_headers);
        }

        if options.body.as_ref().is_some_and(|b| b.is_multipart()) {
            headers.remove(CONTENT_TYPE);
        }

        let credentials = overrides
            .credentials
            .or(options.credentials)
            .unwrap_or(base.credentials);

        let request = TransportRequest {
            method,
            headers,
            body: options.body,
            credentials,
            origin: url::Url::parse(base_url).ok(),
            timeout: options.timeout,
        };

        if debug {
            tracing::debug!(method = %method_name, url = %url, credentials = credentials.as_str(), "dispatching");
        }

        let response = match self.transport.send(&url, request).await {
            Ok(response) => response,
            Err(err) => {
                if debug {
                    tracing::error!(method = %method_name, url = %url, error = %err, "request failed");
                }
                return Err(err);
            }
        };

        if debug {
            tracing::debug!(url = %url, status = response.status_code(), "response");
        }

        if response.status_code() == TOKEN_EXPIRED_STATUS {
            self.spawn_csrf_refresh(effective);
        }

        Ok(response)
    }

    /// Detached forced refresh so the next request carries a valid token
    fn spawn_csrf_refresh(&self, config: Config) {
        let guard = self.guard.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = guard.ensure_csrf_cookie(&config, true).await {
                        tracing::warn!(error = %err, "CSRF refresh after token expiry failed");
                    }
                });
            }
            Err(_) => {
                tracing::warn!("no tokio runtime, skipping CSRF refresh after token expiry");
            }
        }
    }
}

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    config: Config,
    transport_config: TransportConfig,
    cookie_jar: Option<CookieJar>,
    transport: Option<Arc<dyn Transport>>,
    cookies: Option<Arc<dyn CookieStore>>,
}

impl ClientBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Configuration of the default reqwest transport
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Cookie jar shared with the default reqwest transport
    pub fn cookie_jar(mut self, jar: CookieJar) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Replace the reqwest transport; requires [`cookie_store`](Self::cookie_store)
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Cookie store the CSRF token is read from
    pub fn cookie_store(mut self, cookies: Arc<dyn CookieStore>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub fn build(self) -> Result<Client> {
        let (transport, cookies): (Arc<dyn Transport>, Arc<dyn CookieStore>) = match self.transport {
            Some(transport) => {
                let cookies = match (self.cookies, self.cookie_jar) {
                    (Some(cookies), _) => cookies,
                    (None, Some(jar)) => Arc::new(jar),
                    (None, None) => {
                        return Err(Error::Config(
                            "custom transport requires a cookie store".to_string(),
                        ))
                    }
                };
                (transport, cookies)
            }
            None => {
                let jar = self.cookie_jar.unwrap_or_default();
                let cookies = self.cookies.unwrap_or_else(|| Arc::new(jar.clone()));
                let transport = ReqwestTransport::with_config(self.transport_config, jar)?;
                (Arc::new(transport), cookies)
            }
        };

        Ok(Client {
            config: ConfigStore::new(self.config),
            guard: CsrfGuard::new(transport.clone(), cookies.clone()),
            cookies,
            transport,
        })
    }
}

/// Join base URL and path with exactly one `/`, then append the query
pub fn compose_url(base_url: &str, path: &str, query: &[(String, String)]) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    if !query.is_empty() {
        let query_string = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query_string);
    }

    url
}

/// Percent-decode a cookie value the way `decodeURIComponent` does.
///
/// `+` is kept as-is. Malformed input is returned unchanged.
pub fn decode_uri_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let decoded = bytes
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            match decoded {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                None => return raw.to_string(),
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}
