// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar holding the device session cookies
//!
//! Cookies are keyed by domain, path and name, so a later `Set-Cookie` for
//! the same triple replaces the earlier one. A cookie arriving already
//! expired deletes its stored counterpart.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use url::Url;

/// A cookie received from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Lowercase host or domain, without leading dot
    pub domain: String,
    pub path: String,
    /// Only sent over https
    pub secure: bool,
    /// None for session cookies
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Parse a `Set-Cookie` value received from `origin`
    pub fn parse(set_cookie: &str, origin: &Url) -> Option<Self> {
        let mut attributes = set_cookie.split(';').map(str::trim);
        let (name, value) = attributes.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            domain: origin.host_str()?.to_ascii_lowercase(),
            path: default_path(origin),
            secure: false,
            expires: None,
        };
        let mut max_age = None;

        for attribute in attributes {
            let (key, val) = attribute
                .split_once('=')
                .map_or((attribute, ""), |(k, v)| (k.trim(), v.trim()));

            match key.to_ascii_lowercase().as_str() {
                "domain" if !val.is_empty() => {
                    cookie.domain = val.trim_start_matches('.').to_ascii_lowercase();
                }
                "path" if val.starts_with('/') => cookie.path = val.to_string(),
                "secure" => cookie.secure = true,
                "max-age" => max_age = val.parse::<i64>().ok(),
                "expires" => {
                    if let Ok(at) = DateTime::parse_from_rfc2822(val) {
                        cookie.expires = Some(at.with_timezone(&Utc));
                    }
                }
                _ => {}
            }
        }

        // Max-Age takes precedence over Expires
        if let Some(secs) = max_age {
            cookie.expires = Some(Utc::now() + Duration::seconds(secs));
        }

        Some(cookie)
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |at| at <= now)
    }

    /// Check if the cookie goes with a request to `url`
    fn applies_to(&self, url: &Url, now: DateTime<Utc>) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let domain_ok = host == self.domain || host.ends_with(&format!(".{}", self.domain));

        domain_ok
            && path_matches(&self.path, url.path())
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired(now)
    }

    fn key(&self) -> CookieKey {
        (self.domain.clone(), self.path.clone(), self.name.clone())
    }
}

/// Directory of the request path, the path a cookie gets by default
fn default_path(origin: &Url) -> String {
    match origin.path().rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => origin.path()[..idx].to_string(),
    }
}

fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => rest.is_empty() || cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

type CookieKey = (String, String, String);

/// Shared cookie storage; clones see the same cookies
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<DashMap<CookieKey, Cookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie, or delete the stored one if it is already expired
    pub fn insert(&self, cookie: Cookie) {
        if cookie.is_expired(Utc::now()) {
            self.cookies.remove(&cookie.key());
        } else {
            self.cookies.insert(cookie.key(), cookie);
        }
    }

    /// Store a `Set-Cookie` value received from `origin`
    ///
    /// Returns false when the value could not be parsed.
    pub fn store(&self, set_cookie: &str, origin: &Url) -> bool {
        match Cookie::parse(set_cookie, origin) {
            Some(cookie) => {
                tracing::trace!(name = %cookie.name, domain = %cookie.domain, "Store cookie");
                self.insert(cookie);
                true
            }
            None => false,
        }
    }

    /// First live cookie with the given name
    pub fn get(&self, name: &str) -> Option<Cookie> {
        let now = Utc::now();
        self.cookies
            .iter()
            .find(|entry| entry.name == name && !entry.is_expired(now))
            .map(|entry| entry.value().clone())
    }

    /// `Cookie` header value for a request to `url`, longest paths first
    pub fn header_for(&self, url: &Url) -> Option<String> {
        let now = Utc::now();
        self.cookies.retain(|_, cookie| !cookie.is_expired(now));

        let mut matching: Vec<Cookie> = self
            .cookies
            .iter()
            .filter(|entry| entry.applies_to(url, now))
            .map(|entry| entry.value().clone())
            .collect();
        if matching.is_empty() {
            return None;
        }

        matching.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        let pairs: Vec<String> = matching
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        Some(pairs.join("; "))
    }

    /// Forget every cookie
    pub fn clear(&self) {
        self.cookies.clear();
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_set_cookie() {
        let cookie = Cookie::parse(
            "session=abc123; Path=/; Secure; HttpOnly",
            &url("https://192.168.1.10/login"),
        )
        .unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "192.168.1.10");
        assert_eq!(cookie.path, "/");
        assert!(cookie.secure);
        assert!(cookie.expires.is_none());

        assert!(Cookie::parse("no-equals-sign", &url("https://car/")).is_none());
        assert!(Cookie::parse("=value", &url("https://car/")).is_none());
    }

    #[test]
    fn test_default_path_is_request_directory() {
        let origin = url("https://car/api/models/list");
        assert_eq!(Cookie::parse("a=1", &origin).unwrap().path, "/api/models");
        assert_eq!(Cookie::parse("a=1", &url("https://car/login")).unwrap().path, "/");
    }

    #[test]
    fn test_same_key_replaces() {
        let jar = CookieJar::new();
        let origin = url("https://192.168.1.10/login");

        assert!(jar.store("session=one; Path=/", &origin));
        assert!(jar.store("session=two; Path=/", &origin));
        assert_eq!(jar.len(), 1);
        assert_eq!(
            jar.header_for(&url("https://192.168.1.10/api/models")).as_deref(),
            Some("session=two")
        );
        assert_eq!(jar.get("session").unwrap().value, "two");
    }

    #[test]
    fn test_header_scoping() {
        let jar = CookieJar::new();
        jar.store("session=abc; Path=/; Secure", &url("https://127.0.0.1/"));
        jar.store("pref=1; Path=/api", &url("https://127.0.0.1/"));

        assert!(jar.header_for(&url("http://127.0.0.1/")).is_none());
        assert_eq!(
            jar.header_for(&url("https://127.0.0.1/api/models")).as_deref(),
            Some("pref=1; session=abc")
        );
        assert_eq!(
            jar.header_for(&url("https://127.0.0.1/apiary")).as_deref(),
            Some("session=abc")
        );
        assert!(jar.header_for(&url("https://10.0.0.5/")).is_none());
    }

    #[test]
    fn test_expired_cookie_deletes() {
        let jar = CookieJar::new();
        let origin = url("http://127.0.0.1/");

        jar.store("session=abc", &origin);
        assert_eq!(jar.len(), 1);

        jar.store("session=; Max-Age=0", &origin);
        assert!(jar.is_empty());

        jar.store("old=1; Expires=Wed, 21 Oct 2015 07:28:00 GMT", &origin);
        assert!(jar.header_for(&origin).is_none());
    }
}
