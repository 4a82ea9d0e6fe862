// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # deepracer-control - DeepRacer Vehicle Client
//!
//! A blocking client for the web control interface of an AWS DeepRacer car.
//!
//! ## Features
//!
//! - Login: CSRF token from the start page, password POST, session cookie
//! - Telemetry: battery, USB, network, calibration
//! - Driving: manual/autonomous mode, start/stop, steering and throttle
//! - Models: list, upload (streamed multipart), load
//! - Camera: raw MJPEG stream as an `io::Read`
//! - Observation: every request reported to an injectable observer
//!
//! The device serves a self-signed certificate, so TLS verification is off
//! by default.
//!
//! ## Example
//!
//! ```rust,no_run
//! use deepracer_control::{Credentials, VehicleClient, VehicleConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("password").with_host("192.168.1.10");
//!     let mut car = VehicleClient::with_config(credentials, VehicleConfig::default())?;
//!
//!     println!("{}", car.vehicle_info()?);
//!     car.load_model("my-model")?;
//!     car.set_autonomous_mode()?;
//!     car.set_throttle_percent(50)?;
//!     car.start_car()?;
//!
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod http;
pub mod network;
pub mod vehicle;

// Re-exports for convenience

// Client
pub use vehicle::{Credentials, VehicleClient, VehicleConfig, VideoStreamOptions};

// Session
pub use vehicle::{AuthState, Session};

// API values
pub use vehicle::{BatteryStatus, DriveMode, ManualDrive, StartStop, VehicleInfo};

// Errors
pub use error::{Error, ErrorContext, Result, VehicleApiError};

// HTTP
pub use http::{CookieJar, HttpClient, Request, Response, StreamingResponse};

// Observation
pub use network::{EventRecorder, NoopObserver, RequestEvent, RequestObserver, TracingObserver};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
