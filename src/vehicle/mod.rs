// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Vehicle client and its endpoint catalog

mod client;
mod config;
pub mod endpoints;
mod session;
mod types;

pub use client::VehicleClient;
pub use config::{Credentials, VehicleConfig, VideoStreamOptions, DEFAULT_HOST, DEFAULT_NAME};
pub use session::{
    authenticated_headers, extract_csrf_token, AuthState, Session, CSRF_SELECTOR, LOGIN_PATH,
};
pub use types::{
    BatteryStatus, DriveMode, DriveModeRequest, ManualDrive, StartStop, StartStopRequest,
    ThrottleRequest, VehicleInfo,
};
