// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the DeepRacer control client
//!
//! Every failure a caller can observe is an [`Error`]. Variants carry the
//! context needed to tell a dead device from a rejected login or a failed
//! API call (path, status, raw body).

use thiserror::Error;

/// Result type alias for vehicle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Alias naming the error by what it reports
pub type VehicleApiError = Error;

/// Main error type for the vehicle client
#[derive(Error, Debug)]
pub enum Error {
    /// The device did not answer the initial page request
    #[error("The vehicle with URL '{url}' did not respond: {reason}")]
    DeviceUnreachable { url: String, reason: String },

    /// The device answered, but its page carries no CSRF token
    #[error("No csrf-token meta tag found in page from {url}")]
    CsrfTokenMissing { url: String },

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Selector parsing error
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// A header name or value cannot be sent, e.g. a token with control characters
    #[error("Invalid value for header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The device rejected the password
    #[error("Log in failed with status {status}. Error message {body}")]
    LoginFailed { status: u16, body: String },

    /// A GET or PUT against the device API failed
    #[error("{method} {path}: {reason}")]
    ApiCallFailed {
        method: String,
        path: String,
        status: Option<u16>,
        reason: String,
    },

    /// Transport error from the HTTP layer
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a device unreachable error
    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::DeviceUnreachable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a login failure carrying the response body
    pub fn login_failed(status: u16, body: impl Into<String>) -> Self {
        Error::LoginFailed {
            status,
            body: body.into(),
        }
    }

    /// Create an API call failure
    pub fn api_call(
        method: impl Into<String>,
        path: impl Into<String>,
        status: Option<u16>,
        reason: impl Into<String>,
    ) -> Self {
        Error::ApiCallFailed {
            method: method.into(),
            path: path.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the device could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::DeviceUnreachable { .. })
    }

    /// Check if this happened while establishing the session
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::DeviceUnreachable { .. }
                | Error::CsrfTokenMissing { .. }
                | Error::HtmlParse(_)
                | Error::LoginFailed { .. }
        )
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map(|s| (400..500).contains(&s))
            .unwrap_or(false)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .map(|s| (500..600).contains(&s))
            .unwrap_or(false)
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::LoginFailed { status, .. } => Some(*status),
            Error::ApiCallFailed { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the API path if available
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::ApiCallFailed { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::DeviceUnreachable { url, .. } => Some(url),
            Error::CsrfTokenMissing { url } => Some(url),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_call_error() {
        let err = Error::api_call("GET", "api/models", Some(404), "GET action failed with status code 404");

        assert!(err.is_client_error());
        assert!(!err.is_auth_error());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.path(), Some("api/models"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_login_failed_error() {
        let err = Error::login_failed(401, "bad password");

        assert!(err.is_auth_error());
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("bad password"));
    }

    #[test]
    fn test_unreachable_error() {
        let err = Error::unreachable("https://10.0.0.5/", "timed out");

        assert!(err.is_unreachable());
        assert_eq!(err.url(), Some("https://10.0.0.5/"));
        assert_eq!(
            err.to_string(),
            "The vehicle with URL 'https://10.0.0.5/' did not respond: timed out"
        );
    }

    #[test]
    fn test_context() {
        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("loading model").unwrap_err();
        assert_eq!(err.to_string(), "loading model: boom");
    }
}
