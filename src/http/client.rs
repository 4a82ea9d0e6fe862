// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Blocking HTTP client implementation

use std::fs::File;
use std::time::Instant;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode};
use url::Url;

use super::cookie::CookieJar;
use super::request::{Body, MultipartFile, Request};
use super::response::{Response, StreamingResponse};
use super::{headers, DEFAULT_USER_AGENT};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (self-signed device certificates)
    pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            accept_invalid_certs: false,
        }
    }
}

/// Blocking HTTP client with cookie management
///
/// Redirects are followed here rather than inside reqwest so that cookies
/// set on every hop land in the jar. Requests carry no timeout unless one
/// is set on the [`Request`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookie_jar: CookieJar,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(None::<std::time::Duration>)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(false) // We handle cookies ourselves
            .build()?;

        if config.accept_invalid_certs {
            tracing::debug!("TLS certificate verification disabled");
        }

        Ok(Self {
            client,
            config,
            cookie_jar: CookieJar::new(),
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a request and buffer the whole body
    pub fn execute(&self, request: Request) -> Result<Response> {
        let start = Instant::now();

        let response = self.send(request)?;
        let final_url = response.url().clone();
        let status = response.status();
        let response_headers = response.headers().clone();

        let body = response.bytes()?;
        let response_time = start.elapsed().as_millis() as u64;

        Ok(Response::new(
            status,
            response_headers,
            body,
            final_url,
            response_time,
        ))
    }

    /// Execute a request and hand back the open body stream
    pub fn execute_streaming(&self, request: Request) -> Result<StreamingResponse> {
        Ok(StreamingResponse::new(self.send(request)?))
    }

    /// Send `request`, following redirects and storing cookies of every hop
    fn send(&self, request: Request) -> Result<reqwest::blocking::Response> {
        let Request {
            mut method,
            mut url,
            headers: mut request_headers,
            mut body,
            timeout,
        } = request;
        let mut hops = 0;

        loop {
            let response = self.send_once(&method, &url, &request_headers, &body, timeout)?;
            self.store_cookies(response.headers(), response.url());

            let Some(next) = redirect_target(&response) else {
                return Ok(response);
            };
            if hops >= self.config.max_redirects {
                return Err(Error::other(format!(
                    "too many redirects ({}) while requesting {}",
                    hops, url
                )));
            }
            hops += 1;

            let status = response.status();
            tracing::debug!(from = %url, to = %next, status = status.as_u16(), "Follow redirect");

            // 303 always, 301/302 for POST: continue as a bodiless GET
            let keep_method = matches!(
                status,
                StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
            );
            if !keep_method && (status == StatusCode::SEE_OTHER || method == Method::POST) {
                method = Method::GET;
                body = Body::Empty;
                request_headers.remove(headers::CONTENT_TYPE);
            }
            url = next;
        }
    }

    fn send_once(
        &self,
        method: &Method,
        url: &Url,
        request_headers: &HeaderMap,
        body: &Body,
        timeout: Option<std::time::Duration>,
    ) -> Result<reqwest::blocking::Response> {
        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(request_headers.clone());

        if let Some(cookie_header) = self.cookie_jar.header_for(url) {
            builder = builder.header(headers::COOKIE, cookie_header);
        }

        match body {
            Body::Empty => {}
            Body::Bytes(bytes) => builder = builder.body(bytes.to_vec()),
            Body::Multipart(file) => builder = builder.multipart(multipart_form(file)?),
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.send()?)
    }

    fn store_cookies(&self, response_headers: &HeaderMap, url: &Url) {
        for cookie in response_headers.get_all(headers::SET_COOKIE) {
            if let Ok(cookie_str) = cookie.to_str() {
                self.cookie_jar.store(cookie_str, url);
            }
        }
    }
}

/// Where a redirect response points, resolved against its URL
fn redirect_target(response: &reqwest::blocking::Response) -> Option<Url> {
    let status = response.status();
    let is_redirect = matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    );
    if !is_redirect {
        return None;
    }

    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    response.url().join(location).ok()
}

/// Multipart body with the file as its only part, opened per send
fn multipart_form(file: &MultipartFile) -> Result<Form> {
    let handle = File::open(&file.path)?;
    let length = handle.metadata()?.len();
    let part = Part::reader_with_length(handle, length).file_name(file.file_name.clone());
    Ok(Form::new().part(file.field.clone(), part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(!client.config().accept_invalid_certs);
        assert!(client.cookie_jar().is_empty());
    }

    #[test]
    fn test_multipart_missing_file() {
        let file = MultipartFile {
            field: "file".into(),
            file_name: "model.tar.gz".into(),
            path: "/nonexistent/model.tar.gz".into(),
        };
        assert!(matches!(
            multipart_form(&file),
            Err(Error::Io(_))
        ));
    }
}
