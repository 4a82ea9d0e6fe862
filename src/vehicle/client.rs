// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Vehicle client: login handshake and request primitives

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::config::{Credentials, VehicleConfig};
use super::session::{authenticated_headers, extract_csrf_token, AuthState, Session, LOGIN_PATH};
use crate::error::{Error, Result};
use crate::http::{headers, CookieJar, HttpClient, HttpClientConfig, Request, Response, StreamingResponse};
use crate::network::{RequestEvent, RequestObserver, RequestPhase, TracingObserver};

/// Client for one vehicle's web control interface
///
/// Logs in lazily on the first call that needs it and keeps the session for
/// its whole lifetime. Not meant to be shared between callers; create one
/// client per caller instead.
///
/// # Example
///
/// ```rust,no_run
/// use deepracer_control::VehicleClient;
///
/// fn main() -> deepracer_control::Result<()> {
///     let mut car = VehicleClient::new("password", "192.168.1.10")?;
///     println!("{}", car.battery_status()?);
///     car.set_manual_mode()?;
///     car.start_car()?;
///     car.move_car(0.0, 0.5, 0.5)?;
///     car.stop_car()?;
///     Ok(())
/// }
/// ```
pub struct VehicleClient {
    credentials: Credentials,
    config: VehicleConfig,
    base_url: Url,
    http: HttpClient,
    state: AuthState,
    observer: Arc<dyn RequestObserver>,
    next_request_id: u64,
}

impl VehicleClient {
    /// Create a client for the device at `host` with default configuration
    pub fn new(password: impl Into<String>, host: impl Into<String>) -> Result<Self> {
        Self::with_config(
            Credentials::new(password).with_host(host),
            VehicleConfig::default(),
        )
    }

    /// Create a client with explicit credentials and configuration
    pub fn with_config(credentials: Credentials, config: VehicleConfig) -> Result<Self> {
        tracing::debug!(host = credentials.host(), name = credentials.name(), "Create vehicle client");

        let base_url = config.resolve_base_url(credentials.host())?;
        let http = HttpClient::with_config(HttpClientConfig {
            user_agent: config.user_agent.clone(),
            max_redirects: config.max_redirects,
            accept_invalid_certs: config.accept_invalid_certs,
        })
        .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            config,
            base_url,
            http,
            state: AuthState::Unauthenticated,
            observer: Arc::new(TracingObserver::default()),
            next_request_id: 0,
        })
    }

    /// Replace the request observer
    pub fn with_observer<O: RequestObserver + 'static>(self, observer: O) -> Self {
        self.with_shared_observer(Arc::new(observer))
    }

    /// Replace the request observer with a shared one
    pub fn with_shared_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Logical device name
    pub fn name(&self) -> &str {
        self.credentials.name()
    }

    /// Device IP address or hostname
    pub fn host(&self) -> &str {
        self.credentials.host()
    }

    /// Device base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Current authentication state
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Check if the login handshake has completed
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// CSRF token of the current session
    pub fn csrf_token(&self) -> Option<&str> {
        self.state.csrf_token()
    }

    /// Session cookies
    pub fn cookie_jar(&self) -> &CookieJar {
        self.http.cookie_jar()
    }

    /// Run the login handshake unless a session already exists
    pub fn ensure_authenticated(&mut self) -> Result<()> {
        if self.state.is_authenticated() {
            return Ok(());
        }

        let csrf_token = self.fetch_csrf_token()?;
        let headers = self.login(&csrf_token)?;
        self.state = AuthState::Authenticated(Session::new(csrf_token, headers));
        self.observer.on_authenticated(self.base_url.as_str());
        Ok(())
    }

    /// Drop the session (state and cookies) without contacting the device
    pub fn reset_session(&mut self) {
        self.state = AuthState::Unauthenticated;
        self.http.cookie_jar().clear();
    }

    /// Drop the session and log in again, e.g. after the device expired it
    pub fn reauthenticate(&mut self) -> Result<()> {
        self.reset_session();
        self.ensure_authenticated()
    }

    fn fetch_csrf_token(&mut self) -> Result<String> {
        let request = Request::get(self.base_url.clone()).timeout(self.config.connect_timeout);
        let response = self.dispatch(RequestPhase::Page, "", request)?;

        let html = response.text_lossy();
        extract_csrf_token(&html)?.ok_or_else(|| Error::CsrfTokenMissing {
            url: self.base_url.to_string(),
        })
    }

    fn login(&mut self, csrf_token: &str) -> Result<HeaderMap> {
        let user_agent = self.config.user_agent.clone();
        let request = Request::post(self.endpoint(LOGIN_PATH)?)
            .header(headers::X_CSRF_TOKEN, csrf_token)?
            .header(headers::USER_AGENT, &user_agent)?
            .form(&[("password", self.credentials.password())]);

        let response = self.dispatch(RequestPhase::Login, LOGIN_PATH, request)?;
        if response.status != StatusCode::OK {
            return Err(Error::login_failed(
                response.status_code(),
                response.text_lossy(),
            ));
        }

        authenticated_headers(csrf_token, &user_agent, &self.base_url)
    }

    /// GET `path` and decode the JSON body, failing on any status but 200
    pub fn authenticated_get(&mut self, path: &str) -> Result<Value> {
        self.authenticated_get_with(path, true)
    }

    /// GET `path` and decode the JSON body
    pub fn authenticated_get_with(&mut self, path: &str, check_status: bool) -> Result<Value> {
        let session_headers = self.session_headers()?;
        let request = Request::get(self.endpoint(path)?).headers(&session_headers);
        let response = self.dispatch(RequestPhase::Get, path, request)?;

        let status = response.status_code();
        if check_status && response.status != StatusCode::OK {
            return Err(Error::api_call(
                "GET",
                path,
                Some(status),
                format!("GET action failed with status code {}", status),
            ));
        }

        response.json().map_err(|e| {
            Error::api_call(
                "GET",
                path,
                Some(status),
                format!("invalid JSON response ({}): {}", e, response.text_lossy()),
            )
        })
    }

    /// PUT `body` as JSON to `path` and return the response envelope
    ///
    /// Fails unless the status is 200 and the envelope says `"success": true`.
    /// A body serializing to `null` is not sent at all.
    pub fn authenticated_put<T: Serialize + ?Sized>(&mut self, path: &str, body: &T) -> Result<Value> {
        self.authenticated_put_with(path, body, true)
    }

    /// PUT `body` as JSON to `path` and return the response envelope
    pub fn authenticated_put_with<T: Serialize + ?Sized>(
        &mut self,
        path: &str,
        body: &T,
        check_success: bool,
    ) -> Result<Value> {
        let session_headers = self.session_headers()?;
        let mut request = Request::put(self.endpoint(path)?).headers(&session_headers);

        let body = serde_json::to_value(body)?;
        if !body.is_null() {
            request = request.json(&body)?;
        }

        let response = self.dispatch(RequestPhase::Put, path, request)?;
        check_envelope(path, &response, check_success)
    }

    /// Stream a local file as multipart form data to `path`
    pub(crate) fn authenticated_upload(
        &mut self,
        path: &str,
        file_name: &str,
        file: &std::path::Path,
    ) -> Result<Value> {
        let session_headers = self.session_headers()?;
        let request = Request::put(self.endpoint(path)?)
            .headers(&session_headers)
            .multipart_file("file", file_name, file);

        let response = self.dispatch(RequestPhase::Upload, path, request)?;
        check_envelope(path, &response, true)
    }

    /// Open an unbuffered GET of `path`
    pub(crate) fn authenticated_stream(&mut self, path: &str) -> Result<StreamingResponse> {
        let session_headers = self.session_headers()?;
        let request = Request::get(self.endpoint(path)?).headers(&session_headers);

        let event = self.begin(RequestPhase::Stream, path, &request);
        let start = Instant::now();
        let response = match self.http.execute_streaming(request) {
            Ok(response) => response,
            Err(err) => return Err(self.fail(&event, err)),
        };

        let status = response.status();
        self.observer
            .on_response(&event, status.as_u16(), start.elapsed().as_millis() as u64);
        if status != StatusCode::OK {
            let err = Error::api_call(
                "GET",
                path,
                Some(status.as_u16()),
                format!("stream request failed with status code {}", status.as_u16()),
            );
            self.observer.on_error(&event, &err);
            return Err(err);
        }
        Ok(response)
    }

    fn session_headers(&mut self) -> Result<HeaderMap> {
        self.ensure_authenticated()?;
        self.state
            .session()
            .map(|session| session.headers().clone())
            .ok_or_else(|| Error::other("session missing after login"))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn begin(&mut self, phase: RequestPhase, path: &str, request: &Request) -> RequestEvent {
        self.next_request_id += 1;
        let event = RequestEvent::new(
            self.next_request_id,
            phase,
            request.method.as_str(),
            path,
            request.url_str(),
        );
        self.observer.on_request(&event);
        event
    }

    fn dispatch(&mut self, phase: RequestPhase, path: &str, request: Request) -> Result<Response> {
        let event = self.begin(phase, path, &request);
        match self.http.execute(request) {
            Ok(response) => {
                self.observer
                    .on_response(&event, response.status_code(), response.response_time_ms);
                Ok(response)
            }
            Err(err) => Err(self.fail(&event, err)),
        }
    }

    /// Translate a transport failure and report it
    fn fail(&self, event: &RequestEvent, err: Error) -> Error {
        let err = match err {
            Error::Http(e) if event.phase == RequestPhase::Page && (e.is_timeout() || e.is_connect()) => {
                Error::unreachable(self.base_url.as_str(), e.to_string())
            }
            Error::Http(e) => Error::api_call(
                event.method.as_str(),
                event.path.as_str(),
                e.status().map(|s| s.as_u16()),
                format!("Failed to make {} request due to: {}", event.method, e),
            ),
            other => other,
        };
        self.observer.on_error(event, &err);
        err
    }
}

impl std::fmt::Debug for VehicleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VehicleClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.state.is_authenticated())
            .finish()
    }
}

/// Decode a PUT response envelope
fn check_envelope(path: &str, response: &Response, check_success: bool) -> Result<Value> {
    let status = response.status_code();
    let failed = || {
        Error::api_call(
            "PUT",
            path,
            Some(status),
            format!("PUT action failed with body text {}", response.text_lossy()),
        )
    };

    let envelope: Value = match response.json() {
        Ok(value) => value,
        Err(_) if check_success => return Err(failed()),
        Err(e) => {
            return Err(Error::api_call(
                "PUT",
                path,
                Some(status),
                format!("invalid JSON response ({}): {}", e, response.text_lossy()),
            ))
        }
    };

    if check_success {
        let success = envelope.get("success").and_then(Value::as_bool) == Some(true);
        if response.status != StatusCode::OK || !success {
            return Err(failed());
        }
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn response(status: u16, body: &'static str) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::from(body),
            Url::parse("https://192.168.1.10/api/start_stop").unwrap(),
            1,
        )
    }

    #[test]
    fn test_envelope_success() {
        let value = check_envelope("api/start_stop", &response(200, r#"{"success": true, "extra": "x"}"#), true).unwrap();
        assert_eq!(value["extra"], "x");
    }

    #[test]
    fn test_envelope_failure_carries_body() {
        let err = check_envelope("api/start_stop", &response(200, r#"{"success": false}"#), true).unwrap_err();
        assert_eq!(err.status_code(), Some(200));
        assert!(err.to_string().contains(r#"{"success": false}"#));

        let err = check_envelope("api/start_stop", &response(200, r#"{"reason": "none"}"#), true).unwrap_err();
        assert!(matches!(err, Error::ApiCallFailed { .. }));

        let err = check_envelope("api/start_stop", &response(500, r#"{"success": true}"#), true).unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_envelope_unchecked() {
        let value = check_envelope("api/start_stop", &response(500, r#"{"success": false}"#), false).unwrap();
        assert_eq!(value["success"], false);

        assert!(check_envelope("api/start_stop", &response(200, "not json"), false).is_err());
    }

    #[test]
    fn test_client_starts_unauthenticated() {
        let client = VehicleClient::new("secret", "192.168.1.10").unwrap();
        assert!(!client.is_authenticated());
        assert!(client.csrf_token().is_none());
        assert_eq!(client.base_url().as_str(), "https://192.168.1.10/");
        assert_eq!(client.name(), "deepracer");
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
