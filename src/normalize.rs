// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Method and body normalization for Laravel-style method spoofing
//!
//! Form bodies (multipart and URL-encoded) are always sent as `POST` with the
//! intended verb in a `_method` field. JSON bodies keep the real verb.

use reqwest::header::{HeaderMap, HeaderValue};

use crate::http::headers::{content_type, APPLICATION_JSON, CONTENT_TYPE, FORM_URLENCODED};
use crate::http::Body;

/// Name of the form field carrying the intended verb
pub const METHOD_FIELD: &str = "_method";

/// Result of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub method: String,
    pub body: Option<Body>,
    pub headers: HeaderMap,
}

/// Decide the outgoing method, body and headers for a request
pub fn normalize(method: &str, body: Option<Body>, headers: HeaderMap) -> Normalized {
    let method = method.to_ascii_uppercase();
    let mut headers = headers;

    let body = match body {
        Some(Body::Multipart(mut form)) => {
            form.append(METHOD_FIELD, method);
            // The transport generates the multipart content type with its boundary
            if content_type(&headers).is_some_and(|ct| ct.eq_ignore_ascii_case(APPLICATION_JSON)) {
                headers.remove(CONTENT_TYPE);
            }
            return Normalized {
                method: "POST".to_string(),
                body: Some(Body::Multipart(form)),
                headers,
            };
        }
        Some(Body::Form(mut pairs)) => {
            pairs.push((METHOD_FIELD.to_string(), method));
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
            return Normalized {
                method: "POST".to_string(),
                body: Some(Body::Form(pairs)),
                headers,
            };
        }
        Some(Body::Json(value)) => {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            }
            Some(Body::Json(value))
        }
        other => other,
    };

    Normalized {
        method,
        body,
        headers,
    }
}
