// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request event types

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// What a request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestPhase {
    /// Unauthenticated fetch of the device start page
    Page,
    /// Password POST
    Login,
    /// Authenticated JSON GET
    Get,
    /// Authenticated JSON PUT
    Put,
    /// Authenticated multipart upload
    Upload,
    /// Authenticated unbuffered GET
    Stream,
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestPhase::Page => "page",
            RequestPhase::Login => "login",
            RequestPhase::Get => "get",
            RequestPhase::Put => "put",
            RequestPhase::Upload => "upload",
            RequestPhase::Stream => "stream",
        };
        f.write_str(name)
    }
}

/// One request issued by the vehicle client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEvent {
    /// Sequence number within the client, starting at 1
    pub id: u64,
    /// Request phase
    pub phase: RequestPhase,
    /// HTTP method
    pub method: String,
    /// Path relative to the device base URL
    pub path: String,
    /// Absolute URL
    pub url: String,
    /// Timestamp
    pub timestamp: SystemTime,
}

impl RequestEvent {
    /// Create a new event stamped with the current time
    pub fn new(
        id: u64,
        phase: RequestPhase,
        method: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            phase,
            method: method.into(),
            path: path.into(),
            url: url.into(),
            timestamp: SystemTime::now(),
        }
    }
}

impl fmt::Display for RequestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {} ({})", self.id, self.method, self.path, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = RequestEvent::new(
            3,
            RequestPhase::Put,
            "PUT",
            "api/start_stop",
            "https://192.168.1.10/api/start_stop",
        );
        assert_eq!(event.to_string(), "#3 PUT api/start_stop (put)");
    }
}
