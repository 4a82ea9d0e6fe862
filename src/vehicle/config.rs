// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Vehicle client configuration and credentials

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::http::DEFAULT_USER_AGENT;

/// Default device address when none is given
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default logical device name
pub const DEFAULT_NAME: &str = "deepracer";

/// Login credentials and device identity
#[derive(Clone)]
pub struct Credentials {
    password: String,
    host: String,
    name: String,
}

impl Credentials {
    /// Credentials for the default host and name
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            host: DEFAULT_HOST.to_string(),
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// Set the device IP address or hostname
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the logical device name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Read `DEEPRACER_PASSWORD`, `DEEPRACER_HOST` and `DEEPRACER_NAME`
    pub fn from_env() -> Result<Self> {
        let password = env::var("DEEPRACER_PASSWORD")
            .map_err(|_| Error::config("DEEPRACER_PASSWORD is not set"))?;

        let mut credentials = Self::new(password);
        if let Ok(host) = env::var("DEEPRACER_HOST") {
            credentials = credentials.with_host(host);
        }
        if let Ok(name) = env::var("DEEPRACER_NAME") {
            credentials = credentials.with_name(name);
        }
        Ok(credentials)
    }

    /// Device password
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Device IP address or hostname
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Logical device name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"***")
            .field("host", &self.host)
            .field("name", &self.name)
            .finish()
    }
}

/// Camera stream query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStreamOptions {
    /// ROS topic publishing the MJPEG frames
    pub topic: String,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

impl Default for VideoStreamOptions {
    fn default() -> Self {
        Self {
            topic: "/camera_pkg/display_mjpeg".to_string(),
            width: 1920,
            height: 1080,
        }
    }
}

impl VideoStreamOptions {
    /// Path and query relative to the device base URL
    pub fn route(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("topic", &self.topic)
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .finish();
        format!("route?{}", query)
    }
}

/// Vehicle client configuration
#[derive(Debug, Clone)]
pub struct VehicleConfig {
    /// Base URL override; derived from the host as `https://<host>/` when unset
    pub base_url: Option<String>,
    /// Timeout for the initial page request of the login handshake
    pub connect_timeout: Duration,
    /// User agent sent on every request
    pub user_agent: String,
    /// Accept the device's self-signed certificate
    pub accept_invalid_certs: bool,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Camera stream parameters
    pub video: VideoStreamOptions,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: true,
            max_redirects: 10,
            video: VideoStreamOptions::default(),
        }
    }
}

impl VehicleConfig {
    /// Create a new vehicle config
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `DEEPRACER_BASE_URL` on top of the defaults
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var("DEEPRACER_BASE_URL") {
            Ok(url) if !url.is_empty() => config.base_url(url),
            _ => config,
        }
    }

    /// Override the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the handshake timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept or reject invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set camera stream parameters
    pub fn video(mut self, video: VideoStreamOptions) -> Self {
        self.video = video;
        self
    }

    /// Device base URL, always ending with `/`
    pub fn resolve_base_url(&self, host: &str) -> Result<Url> {
        let raw = match self.base_url {
            Some(ref url) => url.clone(),
            None => format!("https://{}/", host),
        };

        let mut url = Url::parse(&raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VehicleConfig::new();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.accept_invalid_certs);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);

        let credentials = Credentials::new("secret");
        assert_eq!(credentials.host(), DEFAULT_HOST);
        assert_eq!(credentials.name(), DEFAULT_NAME);
    }

    #[test]
    fn test_base_url_from_host() {
        let url = VehicleConfig::new().resolve_base_url("192.168.1.10").unwrap();
        assert_eq!(url.as_str(), "https://192.168.1.10/");
        assert_eq!(url.join("api/models").unwrap().as_str(), "https://192.168.1.10/api/models");
    }

    #[test]
    fn test_base_url_override_gets_trailing_slash() {
        let url = VehicleConfig::new()
            .base_url("http://127.0.0.1:8080/car")
            .resolve_base_url("ignored")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/car/");
        assert_eq!(url.join("login").unwrap().as_str(), "http://127.0.0.1:8080/car/login");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("hunter2").with_host("10.0.0.5").with_name("car-1");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("car-1"));
    }

    #[test]
    fn test_video_route() {
        let route = VideoStreamOptions::default().route();
        assert_eq!(
            route,
            "route?topic=%2Fcamera_pkg%2Fdisplay_mjpeg&width=1920&height=1080"
        );

        let odd = VideoStreamOptions {
            topic: "/cam&debug=1 x".to_string(),
            width: 640,
            height: 480,
        };
        let url = Url::parse("https://car/").unwrap().join(&odd.route()).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("topic".to_string(), "/cam&debug=1 x".to_string()));
    }
}
