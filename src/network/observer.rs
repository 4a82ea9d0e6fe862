// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Observer trait for request lifecycle notifications
//!
//! # Example
//!
//! ```rust,no_run
//! use deepracer_control::network::{RequestEvent, RequestObserver};
//!
//! struct Printer;
//!
//! impl RequestObserver for Printer {
//!     fn on_request(&self, event: &RequestEvent) {
//!         println!("> {} {}", event.method, event.path);
//!     }
//! }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use super::event::RequestEvent;
use crate::error::Error;

/// Receives notifications about every request the client issues
///
/// All hooks default to doing nothing.
pub trait RequestObserver: Send + Sync {
    /// Called before a request is sent
    fn on_request(&self, _event: &RequestEvent) {}

    /// Called when a response arrived, whatever its status
    fn on_response(&self, _event: &RequestEvent, _status: u16, _elapsed_ms: u64) {}

    /// Called when a request failed
    fn on_error(&self, _event: &RequestEvent, _error: &Error) {}

    /// Called once the login handshake completed
    fn on_authenticated(&self, _base_url: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    /// Only log requests whose path contains this string
    pub path_filter: Option<String>,
}

impl TracingObserver {
    fn wants(&self, event: &RequestEvent) -> bool {
        self.path_filter
            .as_deref()
            .map_or(true, |filter| event.path.contains(filter))
    }
}

impl RequestObserver for TracingObserver {
    fn on_request(&self, event: &RequestEvent) {
        if self.wants(event) {
            tracing::debug!(id = event.id, phase = %event.phase, "> {} {}", event.method, event.path);
        }
    }

    fn on_response(&self, event: &RequestEvent, status: u16, elapsed_ms: u64) {
        if self.wants(event) {
            tracing::debug!(
                id = event.id,
                status,
                time_ms = elapsed_ms,
                "< {} {}",
                event.method,
                event.path
            );
        }
    }

    fn on_error(&self, event: &RequestEvent, error: &Error) {
        if self.wants(event) {
            tracing::warn!(id = event.id, error = %error, "{} {} failed", event.method, event.path);
        }
    }

    fn on_authenticated(&self, base_url: &str) {
        tracing::info!(url = base_url, "Logged in to vehicle");
    }
}

/// Observation captured by [`EventRecorder`]
#[derive(Debug, Clone)]
pub enum RecordedEvent {
    Request(RequestEvent),
    Response { event: RequestEvent, status: u16 },
    Error { event: RequestEvent, message: String },
    Authenticated { base_url: String },
}

/// Observer that keeps every notification in memory
///
/// Clones share the same storage, so a clone can be handed to the client
/// while the original is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Request notifications only, in order
    pub fn requests(&self) -> Vec<RequestEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Request(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of completed handshakes
    pub fn authentications(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Authenticated { .. }))
            .count()
    }

    /// Forget everything recorded
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl RequestObserver for EventRecorder {
    fn on_request(&self, event: &RequestEvent) {
        self.events.lock().push(RecordedEvent::Request(event.clone()));
    }

    fn on_response(&self, event: &RequestEvent, status: u16, _elapsed_ms: u64) {
        self.events.lock().push(RecordedEvent::Response {
            event: event.clone(),
            status,
        });
    }

    fn on_error(&self, event: &RequestEvent, error: &Error) {
        self.events.lock().push(RecordedEvent::Error {
            event: event.clone(),
            message: error.to_string(),
        });
    }

    fn on_authenticated(&self, base_url: &str) {
        self.events.lock().push(RecordedEvent::Authenticated {
            base_url: base_url.to_string(),
        });
    }
}

/// Fans notifications out to several observers, in insertion order
#[derive(Clone, Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl ObserverChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer
    pub fn add<O: RequestObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Number of observers in the chain
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl RequestObserver for ObserverChain {
    fn on_request(&self, event: &RequestEvent) {
        for observer in &self.observers {
            observer.on_request(event);
        }
    }

    fn on_response(&self, event: &RequestEvent, status: u16, elapsed_ms: u64) {
        for observer in &self.observers {
            observer.on_response(event, status, elapsed_ms);
        }
    }

    fn on_error(&self, event: &RequestEvent, error: &Error) {
        for observer in &self.observers {
            observer.on_error(event, error);
        }
    }

    fn on_authenticated(&self, base_url: &str) {
        for observer in &self.observers {
            observer.on_authenticated(base_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::RequestPhase;

    fn event(id: u64) -> RequestEvent {
        RequestEvent::new(id, RequestPhase::Get, "GET", "api/models", "https://10.0.0.5/api/models")
    }

    #[test]
    fn test_recorder_shares_storage() {
        let recorder = EventRecorder::new();
        let handle = recorder.clone();

        recorder.on_request(&event(1));
        recorder.on_response(&event(1), 200, 5);
        recorder.on_authenticated("https://10.0.0.5/");

        assert_eq!(handle.events().len(), 3);
        assert_eq!(handle.requests().len(), 1);
        assert_eq!(handle.authentications(), 1);

        handle.clear();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_chain_fans_out() {
        let first = EventRecorder::new();
        let second = EventRecorder::new();
        let chain = ObserverChain::new()
            .add(first.clone())
            .add(second.clone())
            .add(NoopObserver);

        chain.on_error(&event(2), &Error::other("boom"));

        assert_eq!(chain.len(), 3);
        assert!(matches!(
            first.events().as_slice(),
            [RecordedEvent::Error { message, .. }] if message == "boom"
        ));
        assert_eq!(second.events().len(), 1);
    }
}
