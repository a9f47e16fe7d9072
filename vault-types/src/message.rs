//! Synced messages and their summary statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DeviceId, MessageId, Timestamp, VaultError};

/// Messaging platform a message was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePlatform {
    /// Carrier text messages.
    Sms,
    /// WhatsApp chats.
    WhatsApp,
}

impl MessagePlatform {
    /// Every platform, in display order.
    pub const ALL: [MessagePlatform; 2] = [MessagePlatform::Sms, MessagePlatform::WhatsApp];

    /// Lowercase tag used in serialized form and message ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for MessagePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessagePlatform {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sms" => Ok(Self::Sms),
            "whatsapp" => Ok(Self::WhatsApp),
            _ => Err(VaultError::unknown("message platform", s)),
        }
    }
}

/// A message imported from a device.
///
/// Messages are append-only: once synced they are never edited, and syncing
/// the same device twice yields duplicate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique within one sync batch (`<device>-<platform>-<n>`).
    pub id: MessageId,
    /// Display name of the other party.
    pub contact: String,
    /// Message body.
    pub content: String,
    /// When the message was sent or received.
    pub timestamp: Timestamp,
    /// Where the message came from.
    pub platform: MessagePlatform,
    /// Device the message was synced from.
    pub device_id: DeviceId,
}

/// Summary published by the message sync service on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStats {
    /// All accumulated messages.
    pub total_messages: usize,
    /// Messages with [`MessagePlatform::Sms`].
    pub sms_messages: usize,
    /// Messages with [`MessagePlatform::WhatsApp`].
    pub whatsapp_messages: usize,
    /// Newest message timestamp, `None` when nothing has been synced.
    pub last_sync: Option<Timestamp>,
    /// Whether a sync is currently running.
    pub sync_in_progress: bool,
}

impl SyncStats {
    /// Count of messages for one platform.
    pub fn count_for(&self, platform: MessagePlatform) -> usize {
        match platform {
            MessagePlatform::Sms => self.sms_messages,
            MessagePlatform::WhatsApp => self.whatsapp_messages,
        }
    }
}
