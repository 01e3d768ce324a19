// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options and body types

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::Serialize;

use super::headers::insert_header;
use crate::error::Result;

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send credentials only to same-origin requests
    SameOrigin,
    /// Always send credentials
    #[default]
    Include,
    /// Never send credentials
    Omit,
}

impl CredentialsMode {
    /// Fetch-style name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialsMode::SameOrigin => "same-origin",
            CredentialsMode::Include => "include",
            CredentialsMode::Omit => "omit",
        }
    }
}

/// A single multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Plain text field
    Text(String),
    /// File upload
    File {
        bytes: Bytes,
        filename: Option<String>,
        mime: Option<String>,
    },
}

/// Multipart form body.
///
/// Fields are kept in order and may repeat. The boundary and its
/// `Content-Type` header are produced by the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    fields: Vec<(String, Part)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Append a file field
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.fields.push((
            name.into(),
            Part::File {
                bytes: bytes.into(),
                filename: Some(filename.into()),
                mime: None,
            },
        ));
        self
    }

    /// Append a text field in place
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), Part::Text(value.into())));
    }

    /// Last text value recorded under `name`
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().rev().find_map(|(n, part)| match part {
            Part::Text(v) if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn fields(&self) -> &[(String, Part)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, Part)> {
        self.fields
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `multipart/form-data`
    Multipart(MultipartForm),
    /// `application/x-www-form-urlencoded` key/value pairs (keys may repeat)
    Form(Vec<(String, String)>),
    /// Structured value sent as JSON
    Json(serde_json::Value),
    /// Raw bytes or text, sent as-is
    Bytes(Bytes),
    /// Opaque binary blob with an optional media type
    Blob {
        bytes: Bytes,
        content_type: Option<String>,
    },
}

impl Body {
    /// Serialize a value into a JSON body
    pub fn json<T: Serialize>(data: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(data)?))
    }

    /// Build a URL-encoded form body
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }

    /// Encode a form body as `application/x-www-form-urlencoded`
    pub fn encode_form(pairs: &[(String, String)]) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<MultipartForm> for Body {
    fn from(form: MultipartForm) -> Self {
        Body::Multipart(form)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Bytes(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(text.as_bytes()))
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request method, uppercased at dispatch (`GET` when unset)
    pub method: Option<String>,
    /// Query parameters, one value per key
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<Body>,
    /// Credentials mode for this request
    pub credentials: Option<CredentialsMode>,
    /// Transport timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set a query parameter, replacing an earlier value for the same key
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Set a header; invalid names or values are skipped
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        insert_header(&mut self.headers, name.as_ref(), value.as_ref());
        self
    }

    /// Merge already-typed headers, replacing same-named ones
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(Body::json(data)?);
        Ok(self)
    }

    /// Set URL-encoded form body
    pub fn form<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(Body::form(pairs));
        self
    }

    /// Set multipart body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uppercased method, `GET` when unset
    pub fn normalized_method(&self) -> String {
        self.method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase()
    }
}
