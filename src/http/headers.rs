// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header names, media types and small helpers over [`HeaderMap`]

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

pub use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE};

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Parse a header name/value pair
pub fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::invalid_header(name, e.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
    Ok((header_name, header_value))
}

/// Insert a header given as strings, replacing any existing value.
///
/// Invalid names or values are skipped with a warning.
pub fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match parse_header(name, value) {
        Ok((name, value)) => {
            headers.insert(name, value);
        }
        Err(err) => tracing::warn!(error = %err, "ignoring header"),
    }
}

/// Overlay `layer` onto `base`; values from `layer` win on name collisions
pub fn merge_headers(base: &mut HeaderMap, layer: &HeaderMap) {
    base.extend(layer.clone());
}

/// Header value as text, if present and visible ASCII
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// The `Content-Type` header as text
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}
