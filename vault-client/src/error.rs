//! Client errors.

use thiserror::Error;
use vault_types::DeviceId;

use crate::backend::BackendError;

/// Errors surfaced by the notifier services.
///
/// Most service operations have no failure path of their own: unknown ids
/// are ignored. The exceptions are the mobile text sync, which needs an
/// existing device with SMS access, and any backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No device with this id is known.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// The device has not granted SMS access.
    #[error("SMS permission not granted for device {0}")]
    SmsPermissionMissing(DeviceId),

    /// Backend error.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
