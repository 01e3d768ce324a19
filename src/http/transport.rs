// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam and the default reqwest-backed implementation

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::multipart;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::Url;

use super::cookie::CookieJar;
use super::headers::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use super::request::{Body, CredentialsMode, MultipartForm, Part};
use super::response::Response;
use crate::error::{Error, Result};

/// Everything a transport needs besides the URL
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Body>,
    pub credentials: CredentialsMode,
    /// Origin `CredentialsMode::SameOrigin` is judged against
    pub origin: Option<Url>,
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Bare request with no headers or body
    pub fn new(method: Method, credentials: CredentialsMode) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
            credentials,
            origin: None,
            timeout: None,
        }
    }
}

/// Performs a single HTTP round trip.
///
/// Failures are returned as-is; the dispatcher never wraps or retries them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<Response>;
}

/// Reqwest transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: super::DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

/// Transport backed by `reqwest`, with cookies kept in a [`CookieJar`].
///
/// Credentials follow fetch semantics: `Include` sends and stores cookies,
/// `SameOrigin` does so only when the URL matches the request's origin,
/// `Omit` never does.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
    cookie_jar: CookieJar,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new(cookie_jar: CookieJar) -> Result<Self> {
        Self::with_config(TransportConfig::default(), cookie_jar)
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig, cookie_jar: CookieJar) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(false); // We handle cookies ourselves

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
            config,
            cookie_jar,
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

/// Whether cookies are sent and stored for `url`
fn credentials_apply(mode: CredentialsMode, origin: Option<&Url>, url: &Url) -> bool {
    match mode {
        CredentialsMode::Include => true,
        CredentialsMode::SameOrigin => origin.map_or(true, |origin| origin.origin() == url.origin()),
        CredentialsMode::Omit => false,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<Response> {
        let start = Instant::now();
        let url = Url::parse(url)?;
        let with_credentials =
            credentials_apply(request.credentials, request.origin.as_ref(), &url);
        let has_content_type = request.headers.contains_key(CONTENT_TYPE);

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(request.headers);

        if with_credentials {
            if let Some(cookie_header) = self.cookie_jar.get_cookie_header(&url) {
                builder = builder.header(COOKIE, cookie_header);
            }
        }

        builder = match request.body {
            None => builder,
            Some(Body::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
            Some(Body::Form(pairs)) => builder.body(Body::encode_form(&pairs)),
            Some(Body::Json(value)) => builder.json(&value),
            Some(Body::Bytes(bytes)) => builder.body(bytes),
            Some(Body::Blob {
                bytes,
                content_type,
            }) => {
                if let Some(ct) = content_type.filter(|_| !has_content_type) {
                    builder = builder.header(CONTENT_TYPE, ct);
                }
                builder.body(bytes)
            }
        };

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let redirected = response.url() != &url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        if with_credentials {
            for cookie in headers.get_all(SET_COOKIE) {
                if let Ok(cookie_str) = cookie.to_str() {
                    self.cookie_jar.add_from_header(cookie_str, &final_url);
                }
            }
        }

        let body = response.bytes().await?;

        Ok(Response::new(
            status,
            headers,
            body,
            final_url,
            redirected,
            response_time,
        ))
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<multipart::Form> {
    let mut out = multipart::Form::new();
    for (name, part) in form.into_fields() {
        out = match part {
            Part::Text(value) => out.text(name, value),
            Part::File {
                bytes,
                filename,
                mime,
            } => {
                let mut part = multipart::Part::bytes(bytes.to_vec());
                if let Some(filename) = filename {
                    part = part.file_name(filename);
                }
                if let Some(mime) = mime {
                    part = part.mime_str(&mime)?;
                }
                out.part(name, part)
            }
        };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(CookieJar::new()).unwrap();
        assert_eq!(transport.config().max_redirects, 10);
        assert!(transport.cookie_jar().is_empty());
    }

    #[test]
    fn test_credentials_modes() {
        let origin = Url::parse("https://app.test").unwrap();
        let same = Url::parse("https://app.test/users").unwrap();
        let cross = Url::parse("https://api.test/users").unwrap();

        assert!(credentials_apply(CredentialsMode::Include, Some(&origin), &cross));
        assert!(credentials_apply(CredentialsMode::SameOrigin, Some(&origin), &same));
        assert!(!credentials_apply(CredentialsMode::SameOrigin, Some(&origin), &cross));
        assert!(credentials_apply(CredentialsMode::SameOrigin, None, &cross));
        assert!(!credentials_apply(CredentialsMode::Omit, Some(&origin), &same));
    }

    #[test]
    fn test_multipart_conversion() {
        let form = MultipartForm::new()
            .text("title", "report")
            .file("doc", "report.pdf", vec![1u8, 2, 3]);
        assert!(to_reqwest_form(form).is_ok());
    }
}
