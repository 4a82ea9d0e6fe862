// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use std::io::{self, Read};

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }
}

/// Unbuffered response whose body is read on demand
///
/// The connection stays open until the value is dropped or [`close`]d.
///
/// [`close`]: StreamingResponse::close
#[derive(Debug)]
pub struct StreamingResponse {
    inner: reqwest::blocking::Response,
}

impl StreamingResponse {
    pub(crate) fn new(inner: reqwest::blocking::Response) -> Self {
        Self { inner }
    }

    /// Response status code
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Content type, carrying the multipart boundary of the camera feed
    pub fn content_type(&self) -> Option<&str> {
        self.inner
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
    }

    /// Release the underlying connection
    pub fn close(self) {
        drop(self.inner);
    }
}

impl Read for StreamingResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}
