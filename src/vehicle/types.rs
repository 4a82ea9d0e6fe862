// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request bodies and decoded responses of the vehicle API

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Battery state as reported by `api/get_battery_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryStatus {
    /// Level 10
    Full,
    /// Level -1
    NotConnected,
    /// Any other level
    Level(i64),
}

impl BatteryStatus {
    /// Map the raw `battery_level` value
    pub fn from_level(level: i64) -> Self {
        match level {
            10 => BatteryStatus::Full,
            -1 => BatteryStatus::NotConnected,
            n => BatteryStatus::Level(n),
        }
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryStatus::Full => f.write_str("Full charge"),
            BatteryStatus::NotConnected => f.write_str("Vehicle battery not connected"),
            BatteryStatus::Level(n) => write!(f, "Battery level: {}", n),
        }
    }
}

/// Vehicle operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveMode {
    /// Onboard model inference
    Auto,
    /// Externally commanded angle and throttle
    Manual,
}

impl DriveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveMode::Auto => "auto",
            DriveMode::Manual => "manual",
        }
    }
}

impl fmt::Display for DriveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartStop {
    Start,
    Stop,
}

/// `api/drive_mode` body
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DriveModeRequest {
    pub drive_mode: DriveMode,
}

/// `api/start_stop` body
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StartStopRequest {
    pub start_stop: StartStop,
}

/// `api/max_nav_throttle` body
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThrottleRequest {
    pub throttle: u32,
}

/// `api/manual_drive` body; values are sent as given
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ManualDrive {
    pub angle: f64,
    pub throttle: f64,
    pub max_speed: f64,
}

/// Snapshot of the vehicle state, one field per telemetry endpoint
#[derive(Debug, Clone, Serialize)]
pub struct VehicleInfo {
    pub usb_connected: Value,
    pub battery: BatteryStatus,
    pub angle: Value,
    pub throttle: Value,
    pub models: Value,
    pub network: Value,
}

impl fmt::Display for VehicleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "USB connection: {}", self.usb_connected)?;
        writeln!(f, "Battery level: {}", self.battery)?;
        writeln!(f, "Angle settings: {}", self.angle)?;
        writeln!(f, "Throttle settings: {}", self.throttle)?;
        writeln!(f, "Models: {}", self.models)?;
        write!(f, "Network details: {}", self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_battery_mapping() {
        assert_eq!(BatteryStatus::from_level(10), BatteryStatus::Full);
        assert_eq!(BatteryStatus::from_level(-1), BatteryStatus::NotConnected);
        assert_eq!(BatteryStatus::from_level(7), BatteryStatus::Level(7));

        assert_eq!(BatteryStatus::Full.to_string(), "Full charge");
        assert_eq!(
            BatteryStatus::NotConnected.to_string(),
            "Vehicle battery not connected"
        );
        assert!(BatteryStatus::from_level(7).to_string().contains('7'));
    }

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_value(DriveModeRequest {
            drive_mode: DriveMode::Auto,
        })
        .unwrap();
        assert_eq!(body, json!({"drive_mode": "auto"}));

        let body = serde_json::to_value(StartStopRequest {
            start_stop: StartStop::Stop,
        })
        .unwrap();
        assert_eq!(body, json!({"start_stop": "stop"}));

        let body = serde_json::to_value(ManualDrive {
            angle: -0.5,
            throttle: 0.25,
            max_speed: 1.0,
        })
        .unwrap();
        assert_eq!(body, json!({"angle": -0.5, "throttle": 0.25, "max_speed": 1.0}));
    }

    #[test]
    fn test_vehicle_info_display() {
        let info = VehicleInfo {
            usb_connected: json!({"is_usb_connected": false}),
            battery: BatteryStatus::Full,
            angle: json!({"max": 30}),
            throttle: json!({"max": 0.8}),
            models: json!([]),
            network: json!({"SSID": "lab"}),
        };
        let text = info.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Battery level: Full charge");
        assert!(lines[5].starts_with("Network details: "));
    }
}
