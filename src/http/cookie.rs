// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar implementation for persistent cookie storage

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Synchronous, read-only view of a cookie store.
///
/// The dispatcher only ever reads cookies by name; writes happen as a side
/// effect of the transport processing `Set-Cookie` headers.
pub trait CookieStore: Send + Sync {
    /// Raw (still percent-encoded) value of the cookie called `name`
    fn read_cookie(&self, name: &str) -> Option<String>;
}

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// Cookie sent with all requests
    #[default]
    None,
    /// Cookie sent with same-site and top-level navigations
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie matches the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain_matches(host) {
            return false;
        }

        if !url.path().starts_with(&self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    fn domain_matches(&self, host: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }

        let domain = self.domain.trim_start_matches('.');
        host == domain || host.ends_with(&format!(".{}", domain))
    }

    /// Parse a Set-Cookie header value
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let mut cookie = Cookie::new(name.trim(), value.trim());

        // Default domain to request host
        cookie.domain = url.host_str().unwrap_or("").to_string();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => cookie.domain = val.trim_start_matches('.').to_string(),
                    "path" => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "lax" => SameSite::Lax,
                            _ => SameSite::None,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Thread-safe cookie storage
#[derive(Debug, Clone)]
pub struct CookieJar {
    /// Cookies stored by domain
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
        }
    }

    /// Add a cookie, replacing one with the same name and path
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        // An already-expired Set-Cookie is a deletion
        if !cookie.is_expired() {
            entry.push(cookie);
        }
    }

    /// Add a cookie from a Set-Cookie header
    pub fn add_from_header(&self, header: &str, url: &Url) {
        if let Some(cookie) = Cookie::parse(header, url) {
            self.add(cookie);
        }
    }

    /// Value of the first live cookie called `name`, regardless of domain
    pub fn read(&self, name: &str) -> Option<String> {
        self.cookies.iter().find_map(|entry| {
            entry
                .value()
                .iter()
                .find(|c| c.name == name && !c.is_expired())
                .map(|c| c.value.clone())
        })
    }

    /// Get all cookies for a URL
    pub fn get_cookies(&self, url: &Url) -> Vec<Cookie> {
        let mut result = Vec::new();

        for entry in self.cookies.iter() {
            for cookie in entry.value().iter() {
                if cookie.matches(url) {
                    result.push(cookie.clone());
                }
            }
        }

        self.remove_expired();

        result
    }

    /// Get Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies(url);
        if cookies.is_empty() {
            return None;
        }

        Some(
            cookies
                .iter()
                .map(|c| c.to_header_value())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Remove a specific cookie
    pub fn remove(&self, name: &str, domain: &str, path: &str) {
        if let Some(mut cookies) = self.cookies.get_mut(domain) {
            cookies.retain(|c| c.name != name || c.path != path);
        }
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.clear();
    }

    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let all_cookies: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        serde_json::to_string(&all_cookies)
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.add(cookie);
        }
        Ok(jar)
    }
}

impl CookieStore for CookieJar {
    fn read_cookie(&self, name: &str) -> Option<String> {
        self.read(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let url = Url::parse("https://api.test/sanctum/csrf-cookie").unwrap();
        let header = "XSRF-TOKEN=eyJpdiI6%3D; Max-Age=7200; path=/; samesite=lax";
        let cookie = Cookie::parse(header, &url).unwrap();

        assert_eq!(cookie.name, "XSRF-TOKEN");
        assert_eq!(cookie.value, "eyJpdiI6%3D");
        assert_eq!(cookie.domain, "api.test");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert!(!cookie.http_only);
        assert!(!cookie.is_expired());
    }

    #[test]
    fn test_read_by_name() {
        let jar = CookieJar::new();
        assert!(jar.read_cookie("XSRF-TOKEN").is_none());

        jar.add(Cookie::new("XSRF-TOKEN", "first").domain("api.test"));
        jar.add(Cookie::new("XSRF-TOKEN", "rotated").domain("api.test"));

        assert_eq!(jar.len(), 1);
        assert_eq!(jar.read_cookie("XSRF-TOKEN").as_deref(), Some("rotated"));
    }

    #[test]
    fn test_expired_set_cookie_deletes() {
        let jar = CookieJar::new();
        let url = Url::parse("https://api.test/").unwrap();
        jar.add_from_header("XSRF-TOKEN=abc; Path=/", &url);
        assert!(jar.read("XSRF-TOKEN").is_some());

        jar.add_from_header("XSRF-TOKEN=deleted; Path=/; Max-Age=-1", &url);
        assert!(jar.read("XSRF-TOKEN").is_none());
    }

    #[test]
    fn test_cookie_header_for_url() {
        let jar = CookieJar::new();
        let url = Url::parse("https://api.test/users").unwrap();

        jar.add(Cookie::new("laravel_session", "s1").domain("api.test"));
        jar.add(Cookie::new("other", "o1").domain("elsewhere.test"));

        assert_eq!(
            jar.get_cookie_header(&url).as_deref(),
            Some("laravel_session=s1")
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_tokens() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("XSRF-TOKEN", "abc").domain("api.test"));

        let restored = CookieJar::from_json(&jar.to_json().unwrap()).unwrap();
        assert_eq!(restored.read("XSRF-TOKEN").as_deref(), Some("abc"));
    }
}
