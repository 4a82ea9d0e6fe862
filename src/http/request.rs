// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP request types

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::headers;
use crate::error::{Error, Result};

/// HTTP request representation
#[derive(Debug, Clone)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Body,
    /// Request timeout (None = no timeout)
    pub timeout: Option<Duration>,
}

/// Request body
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// Raw bytes, content type set through headers
    Bytes(Bytes),
    /// A single file streamed as `multipart/form-data`
    Multipart(MultipartFile),
}

/// File part of a multipart upload
#[derive(Debug, Clone)]
pub struct MultipartFile {
    /// Form field name
    pub field: String,
    /// File name announced to the server
    pub file_name: String,
    /// Local file to stream
    pub path: PathBuf,
}

impl Request {
    /// Create a new request with arbitrary method
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Body::Empty,
            timeout: None,
        }
    }

    /// Create a new GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a new POST request
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Create a new PUT request
    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Set a header, failing on a name or value HTTP cannot carry
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name =
            HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        let header_value =
            HeaderValue::try_from(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Merge a header map into the request, replacing existing values
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    /// Set JSON body, keeping any content type already present
    pub fn json<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Body::Bytes(Bytes::from(json));
        if !self.headers.contains_key(headers::CONTENT_TYPE) {
            self.headers.insert(
                HeaderName::from_static(headers::CONTENT_TYPE),
                HeaderValue::from_static("application/json"),
            );
        }
        Ok(self)
    }

    /// Set form body
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();
        self.body = Body::Bytes(Bytes::from(body));
        self.headers.insert(
            HeaderName::from_static(headers::CONTENT_TYPE),
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self
    }

    /// Stream a local file as the only part of a multipart body
    ///
    /// Any content type already set is dropped; the transport supplies the
    /// multipart boundary.
    pub fn multipart_file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.headers.remove(headers::CONTENT_TYPE);
        self.body = Body::Multipart(MultipartFile {
            field: field.into(),
            file_name: file_name.into(),
            path: path.into(),
        });
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://192.168.1.10/api/models").unwrap()
    }

    #[test]
    fn test_request_creation() {
        let req = Request::get(url());
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.host_str(), Some("192.168.1.10"));
        assert!(req.timeout.is_none());
        assert!(matches!(req.body, Body::Empty));
    }

    #[test]
    fn test_request_headers() {
        let req = Request::get(url()).header("x-custom", "value").unwrap();
        assert_eq!(
            req.headers.get("x-custom").map(|v| v.to_str().unwrap()),
            Some("value")
        );
    }

    #[test]
    fn test_invalid_header_is_error() {
        let err = Request::post(url()).header("x-csrftoken", "bad\ntoken").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { ref name, .. } if name == "x-csrftoken"));

        assert!(Request::post(url()).header("bad header", "v").is_err());
    }

    #[test]
    fn test_json_keeps_existing_content_type() {
        let req = Request::put(url())
            .header(headers::CONTENT_TYPE, "application/json;charset=UTF-8")
            .unwrap()
            .json(&serde_json::json!({"start_stop": "stop"}))
            .unwrap();

        assert_eq!(
            req.headers.get(headers::CONTENT_TYPE).unwrap(),
            "application/json;charset=UTF-8"
        );
        match req.body {
            Body::Bytes(b) => assert_eq!(&b[..], br#"{"start_stop":"stop"}"#),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_form_body() {
        let req = Request::post(url()).form(&[("password", "p@ss word")]);
        match req.body {
            Body::Bytes(b) => assert_eq!(&b[..], b"password=p%40ss+word"),
            other => panic!("unexpected body {:?}", other),
        }
        assert_eq!(
            req.headers.get(headers::CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_multipart_drops_content_type() {
        let req = Request::put(url())
            .header(headers::CONTENT_TYPE, "application/json;charset=UTF-8")
            .unwrap()
            .multipart_file("file", "model.tar.gz", "/tmp/model.tar.gz");

        assert!(req.headers.get(headers::CONTENT_TYPE).is_none());
        match req.body {
            Body::Multipart(part) => {
                assert_eq!(part.field, "file");
                assert_eq!(part.file_name, "model.tar.gz");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }
}
