// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer for the vehicle client
//!
//! Provides a small blocking HTTP client with its own cookie jar, buffered
//! and streamed responses, and multipart file bodies.

mod client;
mod cookie;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::{Cookie, CookieJar};
pub use request::{Body, MultipartFile, Request};
pub use response::{Response, StreamingResponse};

/// Desktop browser user agent the device web UI expects
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    pub const ORIGIN: &str = "origin";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
    pub const X_CSRF_TOKEN: &str = "x-csrftoken";
    pub const SEC_FETCH_MODE: &str = "sec-fetch-mode";
    pub const SEC_FETCH_SITE: &str = "sec-fetch-site";
}
