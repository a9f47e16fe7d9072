//! Devices discovered by the scanner and the snapshot it publishes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DeviceId, Timestamp, VaultError};

/// Operating system of a scanned phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    /// Android handset.
    Android,
    /// iPhone.
    Ios,
}

impl DevicePlatform {
    /// Lowercase tag used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for DevicePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevicePlatform {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(VaultError::unknown("device platform", s)),
        }
    }
}

/// Connection state of a scanned phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Reachable and idle.
    Connected,
    /// Not reachable.
    Disconnected,
    /// A sync is in flight.
    Syncing,
}

impl DeviceStatus {
    /// Lowercase tag used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Syncing => "syncing",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phone whose messages can be backed up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Platform-assigned identifier.
    pub id: DeviceId,
    /// Human-readable name.
    pub name: String,
    /// Operating system.
    #[serde(rename = "type")]
    pub platform: DevicePlatform,
    /// Connection state.
    pub status: DeviceStatus,
    /// When the last sync finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<Timestamp>,
    /// Messages known to be on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
}

/// Snapshot published by the device scanner on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Every known device, in discovery order.
    pub devices: Vec<Device>,
    /// Whether a scan is currently running.
    pub scanning: bool,
}

impl ScanResult {
    /// Look up a device by id.
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| &d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Device {
        Device {
            id: DeviceId::from("1"),
            name: "Pixel".into(),
            platform: DevicePlatform::Android,
            status: DeviceStatus::Connected,
            last_sync: None,
            message_count: Some(12),
        }
    }

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("iOS".parse::<DevicePlatform>().unwrap(), DevicePlatform::Ios);
        assert!("symbian".parse::<DevicePlatform>().is_err());
    }

    #[test]
    fn device_json_uses_type_tag_and_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "android");
        assert_eq!(json["status"], "connected");
        assert_eq!(json["messageCount"], 12);
        assert!(json.get("lastSync").is_none());
    }

    #[test]
    fn scan_result_lookup() {
        let result = ScanResult {
            devices: vec![sample()],
            scanning: false,
        };
        assert!(result.device(&DeviceId::from("1")).is_some());
        assert!(result.device(&DeviceId::from("2")).is_none());
    }
}
