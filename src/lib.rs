// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # sanctum-fetch - CSRF-aware HTTP client for Laravel Sanctum backends
//!
//! Session-authenticated Laravel backends expect the double-submit cookie
//! handshake: fetch `/sanctum/csrf-cookie` once, then mirror the
//! `XSRF-TOKEN` cookie in an `X-XSRF-TOKEN` header on every mutating request.
//! This crate does that transparently.
//!
//! ## Features
//!
//! - CSRF guard: one cookie lookup on the fast path, one GET when missing
//! - Layered configuration: client defaults, per-request options, per-call override
//! - Method spoofing: multipart and URL-encoded bodies go out as `POST` + `_method`
//! - Expired token (419) remediation in the background for the next request
//! - Pluggable transport and cookie store; reqwest + cookie jar by default
//!
//! ## Example
//!
//! ```rust,no_run
//! use sanctum_fetch::{Client, Config, ConfigOverride, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(Config::default().base_url("https://api.test"))?;
//!
//!     let options = RequestOptions::new().json(&serde_json::json!({ "name": "Ann" }))?;
//!     let response = client.post("/users", options, &ConfigOverride::default()).await?;
//!
//!     println!("status: {}", response.status);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod csrf;
pub mod error;
pub mod http;
pub mod normalize;

#[cfg(test)]
mod testing;

// Configuration
pub use config::{Config, ConfigOverride, ConfigStore};

// CSRF
pub use csrf::{csrf_header_name, CsrfGuard};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    compose_url, Body, Client, ClientBuilder, Cookie, CookieJar, CookieStore, CredentialsMode,
    HeaderMap, MultipartForm, Part, RequestOptions, ReqwestTransport, Response, Transport,
    TransportConfig, TransportRequest,
};

// Normalization
pub use normalize::{normalize, Normalized};

/// sanctum-fetch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
