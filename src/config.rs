// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration
//!
//! [`Config`] holds the client-wide defaults. [`ConfigOverride`] is a partial
//! configuration: passed to [`ConfigStore::configure`] it permanently patches
//! the defaults, passed alongside a single request it shadows them for that
//! call only. Both merges are shallow: a provided `default_headers` replaces
//! the whole header list.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::http::headers::{insert_header, ACCEPT, APPLICATION_JSON, CONTENT_TYPE};
use crate::http::CredentialsMode;

/// Built-in backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Built-in CSRF cookie endpoint
pub const DEFAULT_CSRF_PATH: &str = "/sanctum/csrf-cookie";
/// Built-in CSRF cookie name
pub const DEFAULT_CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL
    pub base_url: String,
    /// Path of the CSRF cookie endpoint, appended verbatim to `base_url`
    pub csrf_path: String,
    /// Name of the CSRF cookie; the request header is `X-<name>`
    pub csrf_cookie_name: String,
    /// Credentials mode for ordinary requests
    pub credentials: CredentialsMode,
    /// Headers sent with every request
    pub default_headers: HeaderMap,
    /// Emit diagnostic traces
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_path: DEFAULT_CSRF_PATH.to_string(),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE_NAME.to_string(),
            credentials: CredentialsMode::Include,
            default_headers,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new config with built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set CSRF endpoint path
    pub fn csrf_path(mut self, csrf_path: impl Into<String>) -> Self {
        self.csrf_path = csrf_path.into();
        self
    }

    /// Set CSRF cookie name
    pub fn csrf_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie_name = name.into();
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = mode;
        self
    }

    /// Add default header; invalid names or values are skipped
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.default_headers, name.as_ref(), value.as_ref());
        self
    }

    /// Replace all default headers
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Enable/disable diagnostic traces
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Shallow-merge a partial configuration into this one
    pub fn apply(&mut self, patch: &ConfigOverride) {
        if let Some(ref base_url) = patch.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(ref csrf_path) = patch.csrf_path {
            self.csrf_path = csrf_path.clone();
        }
        if let Some(ref name) = patch.csrf_cookie_name {
            self.csrf_cookie_name = name.clone();
        }
        if let Some(credentials) = patch.credentials {
            self.credentials = credentials;
        }
        if let Some(ref headers) = patch.default_headers {
            self.default_headers = headers.clone();
        }
        if let Some(debug) = patch.debug {
            self.debug = debug;
        }
    }

    /// Copy of this config with `patch` applied
    pub fn merged(&self, patch: &ConfigOverride) -> Self {
        let mut config = self.clone();
        config.apply(patch);
        config
    }
}

/// Partial configuration.
///
/// Every field left as `None` falls through to the layer below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverride {
    pub base_url: Option<String>,
    pub csrf_path: Option<String>,
    pub csrf_cookie_name: Option<String>,
    pub credentials: Option<CredentialsMode>,
    pub default_headers: Option<HeaderMap>,
    pub debug: Option<bool>,
    /// Force the CSRF guard to refetch even when the cookie exists
    pub fresh: bool,
}

impl ConfigOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn csrf_path(mut self, csrf_path: impl Into<String>) -> Self {
        self.csrf_path = Some(csrf_path.into());
        self
    }

    pub fn csrf_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie_name = Some(name.into());
        self
    }

    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Add a header to the override header list, creating it if needed
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let headers = self.default_headers.get_or_insert_with(HeaderMap::new);
        insert_header(headers, name.as_ref(), value.as_ref());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }
}

/// Shared, mutable configuration owned by a client.
///
/// Clones share the same underlying config. Readers get whole snapshots.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Shallow-merge `patch` into the stored configuration
    pub fn configure(&self, patch: &ConfigOverride) {
        let mut config = self.inner.write();
        config.apply(patch);
        if config.debug {
            tracing::debug!(config = ?*config, "configure");
        }
    }

    /// Snapshot of the current configuration
    pub fn snapshot(&self) -> Config {
        self.inner.read().clone()
    }

    /// Snapshot with a per-call override applied
    pub fn effective(&self, patch: &ConfigOverride) -> Config {
        self.inner.read().merged(patch)
    }
}
