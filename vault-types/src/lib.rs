//! # vault-types
//!
//! Data model shared by every msgvault crate.
//!
//! - [`DeviceId`], [`MessageId`], [`Timestamp`] - identity and ordering types
//! - [`Device`], [`ScanResult`] - scanned phones and the scanner snapshot
//! - [`Message`], [`SyncStats`] - synced SMS/WhatsApp records and their summary
//! - [`MobileDevice`], [`TextMessage`] - permission-gated devices and raw texts
//! - [`VaultError`] - parse errors for the string forms of the enums

#![warn(missing_docs)]
#![warn(clippy::all)]

mod device;
mod error;
mod ids;
mod message;
mod mobile;

pub use device::{Device, DevicePlatform, DeviceStatus, ScanResult};
pub use error::VaultError;
pub use ids::{DeviceId, MessageId, Timestamp};
pub use message::{Message, MessagePlatform, SyncStats};
pub use mobile::{
    Direction, MobileDevice, MobileDeviceKind, MobilePlatform, MobileStatus, PermissionLevel,
    Permissions, TextMessage, CURRENT_DEVICE_ID,
};
