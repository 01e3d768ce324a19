// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for sanctum-fetch
//!
//! Transport failures surface exactly as the transport reported them.
//! The only error the pipeline itself produces from a response is
//! [`Error::CsrfFetch`], raised when the CSRF endpoint answers non-2xx.

use thiserror::Error;

/// Result type alias for sanctum-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sanctum-fetch
#[derive(Error, Debug)]
pub enum Error {
    /// CSRF cookie endpoint answered with a non-success status
    #[error("Failed CSRF fetch from {url}: {status}")]
    CsrfFetch { status: u16, url: String },

    /// HTTP request failed in the reqwest transport
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a custom transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request method is not a valid HTTP token
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Header name or value rejected by the transport
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a CSRF fetch error
    pub fn csrf_fetch(status: u16, url: impl Into<String>) -> Self {
        Error::CsrfFetch {
            status,
            url: url.into(),
        }
    }

    /// Create a custom transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport(_))
    }

    /// Check if this is a CSRF acquisition failure
    pub fn is_csrf(&self) -> bool {
        matches!(self, Error::CsrfFetch { .. })
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::CsrfFetch { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::CsrfFetch { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}
