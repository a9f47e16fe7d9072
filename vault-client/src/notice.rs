//! User-facing notices.
//!
//! Short title/description pairs shown after an operation finishes, e.g.
//! as a toast in a UI or a line on the terminal.

use std::fmt;

use crate::error::ClientError;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Success or neutral information.
    Info,
    /// Something failed.
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Headline.
    pub title: String,
    /// Detail line.
    pub description: String,
    /// Presentation hint.
    pub severity: Severity,
}

impl Notice {
    fn info(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            severity: Severity::Info,
        }
    }

    fn destructive(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            severity: Severity::Destructive,
        }
    }

    /// A device scan finished.
    pub fn scan_complete(found: usize) -> Self {
        Self::info(
            "Scan Complete",
            format!("Found {found} devices available for syncing."),
        )
    }

    /// A device scan failed.
    pub fn scan_failed() -> Self {
        Self::destructive(
            "Scan Failed",
            "Unable to scan for devices. Please try again.".to_string(),
        )
    }

    /// A device granted access.
    pub fn permissions_granted(device_name: &str) -> Self {
        Self::info(
            "Permissions Granted",
            format!("{device_name} can now access your messages."),
        )
    }

    /// A permission request was refused or failed.
    pub fn permission_denied() -> Self {
        Self::destructive(
            "Permission Denied",
            "Message access was denied. Please try again.".to_string(),
        )
    }

    /// Sync attempted without SMS access.
    pub fn permission_required() -> Self {
        Self::destructive(
            "Permission Required",
            "Please grant SMS permissions first.".to_string(),
        )
    }

    /// Messages were imported.
    pub fn sync_complete(count: usize, device_name: &str) -> Self {
        Self::info(
            "Sync Complete",
            format!("Successfully synced {count} messages from {device_name}"),
        )
    }

    /// A sync failed.
    pub fn sync_failed() -> Self {
        Self::destructive(
            "Sync Failed",
            "Failed to sync messages. Please try again.".to_string(),
        )
    }

    /// Unknown device id.
    pub fn device_not_found(id: &str) -> Self {
        Self::destructive("Device Not Found", format!("No device with id {id}."))
    }

    /// Convert a sync error into the notice a user should see.
    pub fn from_error(err: &ClientError) -> Self {
        match err {
            ClientError::DeviceNotFound(id) => Self::device_not_found(id.as_str()),
            ClientError::SmsPermissionMissing(_) => Self::permission_required(),
            ClientError::Backend(_) => Self::sync_failed(),
        }
    }

    /// Whether this notice reports a failure.
    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
