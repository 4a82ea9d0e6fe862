// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Vehicle API endpoints

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::client::VehicleClient;
use super::config::VideoStreamOptions;
use super::types::{
    BatteryStatus, DriveMode, DriveModeRequest, ManualDrive, StartStop, StartStopRequest,
    ThrottleRequest, VehicleInfo,
};
use crate::error::{Error, Result};
use crate::http::StreamingResponse;

pub const IS_USB_CONNECTED: &str = "api/is_usb_connected";
pub const BATTERY_LEVEL: &str = "api/get_battery_level";
pub const NETWORK_DETAILS: &str = "api/get_network_details";
pub const DRIVE_MODE: &str = "api/drive_mode";
pub const MAX_NAV_THROTTLE: &str = "api/max_nav_throttle";
pub const START_STOP: &str = "api/start_stop";
pub const MANUAL_DRIVE: &str = "api/manual_drive";
pub const MODELS: &str = "api/models";
pub const UPLOADED_MODELS: &str = "api/uploaded_model_list";
pub const UPLOAD_MODELS: &str = "api/uploadModels";
pub const CALIBRATION_MODE: &str = "api/set_calibration_mode";
pub const GET_CALIBRATION_ANGLE: &str = "api/get_calibration/angle";
pub const GET_CALIBRATION_THROTTLE: &str = "api/get_calibration/throttle";
pub const SET_CALIBRATION_ANGLE: &str = "api/set_calibration/angle";
pub const SET_CALIBRATION_THROTTLE: &str = "api/set_calibration/throttle";

/// Path loading `name`, with the name encoded as one path segment
pub fn model_path(name: &str) -> String {
    let segment: String = url::form_urlencoded::byte_serialize(name.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("api/models/{}/model", segment)
}

impl VehicleClient {
    // Telemetry

    pub fn is_usb_connected(&mut self) -> Result<Value> {
        self.authenticated_get(IS_USB_CONNECTED)
    }

    /// Battery level, mapped to its charge state
    pub fn battery_status(&mut self) -> Result<BatteryStatus> {
        let response = self.authenticated_get(BATTERY_LEVEL)?;
        response
            .get("battery_level")
            .and_then(Value::as_i64)
            .map(BatteryStatus::from_level)
            .ok_or_else(|| {
                Error::api_call(
                    "GET",
                    BATTERY_LEVEL,
                    Some(200),
                    format!("response has no integer battery_level: {}", response),
                )
            })
    }

    pub fn network_details(&mut self) -> Result<Value> {
        self.authenticated_get(NETWORK_DETAILS)
    }

    /// Collect every telemetry endpoint into one snapshot
    pub fn vehicle_info(&mut self) -> Result<VehicleInfo> {
        Ok(VehicleInfo {
            usb_connected: self.is_usb_connected()?,
            battery: self.battery_status()?,
            angle: self.calibration_angle()?,
            throttle: self.calibration_throttle()?,
            models: self.models()?,
            network: self.network_details()?,
        })
    }

    /// Camera MJPEG stream with the configured topic and resolution
    ///
    /// The connection stays open until the returned stream is dropped.
    pub fn raw_video_stream(&mut self) -> Result<StreamingResponse> {
        let options = self.config().video.clone();
        self.video_stream(&options)
    }

    /// Camera MJPEG stream with explicit parameters
    pub fn video_stream(&mut self, options: &VideoStreamOptions) -> Result<StreamingResponse> {
        self.authenticated_stream(&options.route())
    }

    // Driving

    /// Stop the car, then switch to `mode`
    pub fn set_drive_mode(&mut self, mode: DriveMode) -> Result<Value> {
        self.stop_car()?;
        self.authenticated_put(DRIVE_MODE, &DriveModeRequest { drive_mode: mode })
    }

    pub fn set_autonomous_mode(&mut self) -> Result<Value> {
        self.set_drive_mode(DriveMode::Auto)
    }

    pub fn set_manual_mode(&mut self) -> Result<Value> {
        self.set_drive_mode(DriveMode::Manual)
    }

    /// Maximum throttle used in autonomous mode
    pub fn set_throttle_percent(&mut self, throttle_percent: u32) -> Result<Value> {
        self.authenticated_put(
            MAX_NAV_THROTTLE,
            &ThrottleRequest {
                throttle: throttle_percent,
            },
        )
    }

    pub fn start_car(&mut self) -> Result<Value> {
        self.authenticated_put(
            START_STOP,
            &StartStopRequest {
                start_stop: StartStop::Start,
            },
        )
    }

    pub fn stop_car(&mut self) -> Result<Value> {
        self.authenticated_put(
            START_STOP,
            &StartStopRequest {
                start_stop: StartStop::Stop,
            },
        )
    }

    /// Manual drive command. Values are not range checked.
    pub fn move_car(&mut self, steering_angle: f64, throttle: f64, max_speed: f64) -> Result<Value> {
        self.authenticated_put(
            MANUAL_DRIVE,
            &ManualDrive {
                angle: steering_angle,
                throttle,
                max_speed,
            },
        )
    }

    // Models

    pub fn models(&mut self) -> Result<Value> {
        self.authenticated_get(MODELS)
    }

    pub fn uploaded_models(&mut self) -> Result<Value> {
        self.authenticated_get(UPLOADED_MODELS)
    }

    pub fn load_model(&mut self, model_name: &str) -> Result<Value> {
        self.authenticated_put(&model_path(model_name), &Value::Null)
    }

    /// Upload a model archive, streamed from disk under `model_name`
    pub fn upload_model(&mut self, model_zip_path: impl AsRef<Path>, model_name: &str) -> Result<Value> {
        self.authenticated_upload(UPLOAD_MODELS, model_name, model_zip_path.as_ref())
    }

    // Calibration

    pub fn set_calibration_mode(&mut self) -> Result<Value> {
        self.authenticated_get(CALIBRATION_MODE)
    }

    pub fn calibration_angle(&mut self) -> Result<Value> {
        self.authenticated_get(GET_CALIBRATION_ANGLE)
    }

    pub fn calibration_throttle(&mut self) -> Result<Value> {
        self.authenticated_get(GET_CALIBRATION_THROTTLE)
    }

    pub fn set_calibration_angle<T: Serialize + ?Sized>(&mut self, calibration: &T) -> Result<Value> {
        self.authenticated_put(SET_CALIBRATION_ANGLE, calibration)
    }

    pub fn set_calibration_throttle<T: Serialize + ?Sized>(&mut self, calibration: &T) -> Result<Value> {
        self.authenticated_put(SET_CALIBRATION_THROTTLE, calibration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path() {
        assert_eq!(model_path("my-model_v2"), "api/models/my-model_v2/model");
        assert_eq!(model_path("track 1"), "api/models/track%201/model");
        assert_eq!(model_path("a/b"), "api/models/a%2Fb/model");
    }
}
