// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request observation
//!
//! The vehicle client reports every request it makes to an injected
//! [`RequestObserver`] instead of configuring logging globally.

mod event;
mod observer;

pub use event::{RequestEvent, RequestPhase};
pub use observer::{
    EventRecorder, NoopObserver, ObserverChain, RecordedEvent, RequestObserver, TracingObserver,
};
