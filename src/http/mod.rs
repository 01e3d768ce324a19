// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for sanctum-fetch
//!
//! The dispatching [`Client`], its request/response types, and the two
//! collaborator seams it depends on: a [`Transport`] that performs the
//! round trip and a [`CookieStore`] it reads the CSRF cookie from.

mod client;
mod cookie;
pub mod headers;
mod request;
mod response;
mod transport;

pub use client::{compose_url, decode_uri_component, Client, ClientBuilder};
pub use cookie::{Cookie, CookieJar, CookieStore, SameSite};
pub use reqwest::header::HeaderMap;
pub use request::{Body, CredentialsMode, MultipartForm, Part, RequestOptions};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport, TransportConfig, TransportRequest};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("sanctum-fetch/", env!("CARGO_PKG_VERSION"));

/// Methods that require a CSRF token
pub const MUTATING_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// Status a Laravel backend answers with when the CSRF token has expired
pub const TOKEN_EXPIRED_STATUS: u16 = 419;

/// Check whether a (normalized, uppercase) method requires a CSRF token
pub fn is_mutating(method: &str) -> bool {
    MUTATING_METHODS.contains(&method)
}
