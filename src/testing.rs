// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory collaborators for unit tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use reqwest::StatusCode;
use url::Url;

use crate::error::{Error, Result};
use crate::http::{CookieStore, Response, Transport, TransportRequest};

/// Cookie store backed by a plain map
#[derive(Debug, Default)]
pub struct StaticCookies {
    values: RwLock<HashMap<String, String>>,
}

impl StaticCookies {
    pub fn with(name: &str, value: &str) -> Self {
        let cookies = Self::default();
        cookies.set(name, value);
        cookies
    }

    pub fn set(&self, name: &str, value: &str) {
        self.values.write().insert(name.to_string(), value.to_string());
    }
}

impl CookieStore for StaticCookies {
    fn read_cookie(&self, name: &str) -> Option<String> {
        self.values.read().get(name).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub request: TransportRequest,
}

enum Outcome {
    Status(u16),
    Fail(String),
}

/// Transport that records every call and answers 200 unless told otherwise
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    outcomes: HashMap<String, Outcome>,
    issuer: Option<(String, Arc<StaticCookies>, String, String)>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `path` with `status`
    pub fn respond(mut self, path: &str, status: u16) -> Self {
        self.outcomes.insert(path.to_string(), Outcome::Status(status));
        self
    }

    /// Fail requests to `path` with a transport error
    pub fn fail(mut self, path: &str, message: &str) -> Self {
        self.outcomes
            .insert(path.to_string(), Outcome::Fail(message.to_string()));
        self
    }

    /// Store `name=value` in `cookies` whenever `path` is requested
    pub fn issue_cookie(
        mut self,
        path: &str,
        cookies: Arc<StaticCookies>,
        name: &str,
        value: &str,
    ) -> Self {
        self.issuer = Some((path.to_string(), cookies, name.to_string(), value.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, url: &str, request: TransportRequest) -> Result<Response> {
        self.calls.lock().push(RecordedCall {
            url: url.to_string(),
            request,
        });

        let parsed = Url::parse(url)?;
        let status = match self.outcomes.get(parsed.path()) {
            Some(Outcome::Fail(message)) => return Err(Error::transport(message.clone())),
            Some(Outcome::Status(status)) => *status,
            None => 200,
        };

        if let Some((ref path, ref cookies, ref name, ref value)) = self.issuer {
            if parsed.path() == path {
                cookies.set(name, value);
            }
        }

        let status = StatusCode::from_u16(status).map_err(|e| Error::transport(e.to_string()))?;
        Ok(Response::from_status(status, parsed))
    }
}
