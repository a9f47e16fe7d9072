//! Permission-gated mobile devices and the raw texts read from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DeviceId, MessageId, Timestamp, VaultError};

/// Id of the device the app itself is running on.
pub const CURRENT_DEVICE_ID: &str = "current-device";

/// How a mobile device is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileDeviceKind {
    /// The host running msgvault.
    Current,
    /// Paired over Bluetooth.
    Bluetooth,
    /// Reachable on the local network.
    Wifi,
}

impl fmt::Display for MobileDeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "current",
            Self::Bluetooth => "bluetooth",
            Self::Wifi => "wifi",
        })
    }
}

/// Platform a mobile device runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilePlatform {
    /// Android handset.
    Android,
    /// iPhone.
    Ios,
    /// Browser host; no nearby-device discovery is possible.
    Web,
}

impl MobilePlatform {
    /// Lowercase tag used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for MobilePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MobilePlatform {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "web" => Ok(Self::Web),
            _ => Err(VaultError::unknown("mobile platform", s)),
        }
    }
}

/// Lifecycle state of a mobile device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileStatus {
    /// Reachable and idle.
    Connected,
    /// Being probed by a scan.
    Scanning,
    /// A text sync is in flight.
    Syncing,
    /// The last sync failed.
    Error,
}

impl fmt::Display for MobileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connected => "connected",
            Self::Scanning => "scanning",
            Self::Syncing => "syncing",
            Self::Error => "error",
        })
    }
}

/// Capabilities granted by the device owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    /// Read text messages.
    pub sms: bool,
    /// Read the address book.
    pub contacts: bool,
    /// Write backups to local storage.
    pub storage: bool,
}

impl Permissions {
    /// Nothing granted.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every capability granted.
    pub fn all() -> Self {
        Self {
            sms: true,
            contacts: true,
            storage: true,
        }
    }

    /// Coarse summary shown next to a device.
    pub fn level(&self) -> PermissionLevel {
        match (self.sms, self.contacts && self.storage) {
            (true, true) => PermissionLevel::Full,
            (true, false) => PermissionLevel::Basic,
            (false, _) => PermissionLevel::Required,
        }
    }
}

/// Coarse permission summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// All permissions granted.
    Full,
    /// SMS access granted, contacts or storage missing.
    Basic,
    /// SMS access missing; syncing is impossible.
    Required,
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full => "All permissions granted",
            Self::Basic => "Basic permissions granted",
            Self::Required => "Permissions required",
        })
    }
}

/// A device reachable by the mobile scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileDevice {
    /// Identifier; [`CURRENT_DEVICE_ID`] for the host.
    pub id: DeviceId,
    /// Human-readable name.
    pub name: String,
    /// How the device is reachable.
    #[serde(rename = "type")]
    pub kind: MobileDeviceKind,
    /// Platform the device runs on.
    pub platform: MobilePlatform,
    /// Lifecycle state.
    pub status: MobileStatus,
    /// Texts imported by the last sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    /// When the last sync finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<Timestamp>,
    /// Granted capabilities.
    pub permissions: Permissions,
}

impl MobileDevice {
    /// The entry representing the host itself.
    pub fn current(platform: MobilePlatform) -> Self {
        let name = match platform {
            MobilePlatform::Web => "Web Browser",
            MobilePlatform::Ios => "My iPhone",
            MobilePlatform::Android => "My Android",
        };
        Self {
            id: DeviceId::from(CURRENT_DEVICE_ID),
            name: name.to_string(),
            kind: MobileDeviceKind::Current,
            platform,
            status: MobileStatus::Connected,
            message_count: None,
            last_sync: None,
            permissions: Permissions::none(),
        }
    }

    /// Whether this entry is the host.
    pub fn is_current(&self) -> bool {
        self.kind == MobileDeviceKind::Current
    }
}

/// Whether a text was received or sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received by the device owner.
    Inbox,
    /// Sent by the device owner.
    Sent,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
        })
    }
}

/// A raw text message read from a mobile device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    /// Unique per device (`msg-<device>-<n>`).
    pub id: MessageId,
    /// Conversation thread the text belongs to.
    pub thread_id: String,
    /// Sender or recipient address.
    pub address: String,
    /// Message body.
    pub body: String,
    /// Milliseconds since the epoch.
    pub date: Timestamp,
    /// Received or sent.
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Whether the owner has read it.
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_device_names_follow_platform() {
        assert_eq!(MobileDevice::current(MobilePlatform::Web).name, "Web Browser");
        assert_eq!(MobileDevice::current(MobilePlatform::Ios).name, "My iPhone");
        assert_eq!(MobileDevice::current(MobilePlatform::Android).name, "My Android");
    }

    #[test]
    fn current_device_starts_without_permissions() {
        let device = MobileDevice::current(MobilePlatform::Android);
        assert!(device.is_current());
        assert_eq!(device.id.as_str(), CURRENT_DEVICE_ID);
        assert_eq!(device.status, MobileStatus::Connected);
        assert_eq!(device.permissions, Permissions::none());
    }

    #[test]
    fn permission_levels() {
        assert_eq!(Permissions::all().level(), PermissionLevel::Full);
        assert_eq!(Permissions::none().level(), PermissionLevel::Required);

        let sms_only = Permissions {
            sms: true,
            ..Permissions::none()
        };
        assert_eq!(sms_only.level(), PermissionLevel::Basic);

        let no_sms = Permissions {
            sms: false,
            ..Permissions::all()
        };
        assert_eq!(no_sms.level(), PermissionLevel::Required);
    }

    #[test]
    fn mobile_platform_parses() {
        assert_eq!("web".parse::<MobilePlatform>().unwrap(), MobilePlatform::Web);
        assert!("tizen".parse::<MobilePlatform>().is_err());
    }

    #[test]
    fn text_message_json_shape() {
        let text = TextMessage {
            id: MessageId::new("msg-current-device-0"),
            thread_id: "thread-0".into(),
            address: "Mom".into(),
            body: "Hey, how are you?".into(),
            date: Timestamp::from_millis(42),
            direction: Direction::Sent,
            read: true,
        };
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["threadId"], "thread-0");
        assert_eq!(json["type"], "sent");
        assert_eq!(json["date"], 42);
    }
}
