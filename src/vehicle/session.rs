// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Login session state
//!
//! The device web UI embeds a CSRF token in `<meta name="csrf-token">` on its
//! start page. Posting the password with that token in `X-CSRFToken` yields
//! a session cookie; every later call repeats the token together with a
//! browser-like header set.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::dom::parse_html;
use crate::error::{Error, Result};
use crate::http::headers;

/// Selector of the meta tag carrying the CSRF token
pub const CSRF_SELECTOR: &str = r#"meta[name="csrf-token"]"#;

/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "login";

/// Established session: token and the headers derived from it
#[derive(Debug, Clone)]
pub struct Session {
    csrf_token: String,
    headers: HeaderMap,
}

impl Session {
    pub(crate) fn new(csrf_token: String, headers: HeaderMap) -> Self {
        Self {
            csrf_token,
            headers,
        }
    }

    /// CSRF token sent with every request
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Header set attached to every authenticated request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Authentication state of a client
///
/// The token and the header set only exist together inside
/// [`AuthState::Authenticated`].
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// No handshake performed yet
    #[default]
    Unauthenticated,
    /// Logged in
    Authenticated(Session),
}

impl AuthState {
    /// Check if the handshake has completed
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The session, if logged in
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Unauthenticated => None,
        }
    }

    /// The CSRF token, if logged in
    pub fn csrf_token(&self) -> Option<&str> {
        self.session().map(Session::csrf_token)
    }
}

/// Find the CSRF token in the device start page
///
/// `Ok(None)` when the first `<meta name="csrf-token">` is missing or has
/// no `content`.
pub fn extract_csrf_token(html: &str) -> Result<Option<String>> {
    let doc = parse_html(html)?;
    let token = doc
        .query_selector(CSRF_SELECTOR)?
        .and_then(|meta| meta.get_attribute("content"))
        .map(str::to_string);
    Ok(token)
}

/// Build the header set reused by every authenticated request
pub fn authenticated_headers(csrf_token: &str, user_agent: &str, base_url: &Url) -> Result<HeaderMap> {
    let base = base_url.as_str();
    let referer = format!("{}home", base);

    let entries: [(&'static str, &str); 11] = [
        (headers::X_CSRF_TOKEN, csrf_token),
        (headers::USER_AGENT, user_agent),
        (headers::REFERER, &referer),
        (headers::ORIGIN, base),
        (headers::ACCEPT_ENCODING, "gzip, deflate, br"),
        (headers::CONTENT_TYPE, "application/json;charset=UTF-8"),
        (headers::ACCEPT, "*/*"),
        (headers::SEC_FETCH_MODE, "cors"),
        (headers::SEC_FETCH_SITE, "same-origin"),
        (headers::ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
        (headers::X_REQUESTED_WITH, "XMLHttpRequest"),
    ];

    let mut map = HeaderMap::with_capacity(entries.len());
    for (name, value) in entries {
        let value =
            HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        map.insert(HeaderName::from_static(name), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_csrf_token() {
        let html = r#"<html><head><meta name="csrf-token" content="abc.def"></head></html>"#;
        assert_eq!(extract_csrf_token(html).unwrap().as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_extract_csrf_token_missing() {
        assert_eq!(extract_csrf_token("<html><body>Not a car</body></html>").unwrap(), None);
        assert_eq!(
            extract_csrf_token(r#"<meta name="csrf-token">"#).unwrap(),
            None,
            "tag without content"
        );
    }

    #[test]
    fn test_authenticated_headers() {
        let base = Url::parse("https://192.168.1.10/").unwrap();
        let map = authenticated_headers("tok", "agent/1.0", &base).unwrap();

        assert_eq!(map.len(), 11);
        assert_eq!(map["x-csrftoken"], "tok");
        assert_eq!(map["user-agent"], "agent/1.0");
        assert_eq!(map["referer"], "https://192.168.1.10/home");
        assert_eq!(map["origin"], "https://192.168.1.10/");
        assert_eq!(map["content-type"], "application/json;charset=UTF-8");
        assert_eq!(map["x-requested-with"], "XMLHttpRequest");
    }

    #[test]
    fn test_authenticated_headers_rejects_bad_token() {
        let base = Url::parse("https://192.168.1.10/").unwrap();
        let err = authenticated_headers("bad\ntoken", "agent", &base).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { ref name, .. } if name == "x-csrftoken"));
    }

    #[test]
    fn test_extract_first_csrf_meta_only() {
        let html = r#"<meta name="csrf-token"><meta name="csrf-token" content="second">"#;
        assert_eq!(extract_csrf_token(html).unwrap(), None);
    }

    #[test]
    fn test_auth_state() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert!(state.csrf_token().is_none());

        let state = AuthState::Authenticated(Session::new("tok".into(), HeaderMap::new()));
        assert!(state.is_authenticated());
        assert_eq!(state.csrf_token(), Some("tok"));
    }
}
