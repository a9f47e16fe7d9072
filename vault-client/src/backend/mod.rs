//! Device backend abstraction for msgvault.
//!
//! The services own state and notifications; everything that would talk to
//! a phone or a messaging platform goes through [`Backend`]. Today the only
//! implementation is [`MockBackend`], which fabricates data after a fixed
//! delay. A real SMS/WhatsApp integration slots in behind the same trait.
//!
//! # Design
//!
//! Each method is one device round trip:
//! - `discover_devices()` / `sync_device()` back the device scanner
//! - `fetch_messages()` backs message sync
//! - `discover_nearby()` / `request_permissions()` / `read_texts()` back the
//!   mobile scanner
//!
//! # Example
//!
//! ```ignore
//! let backend = Arc::new(MockBackend::new(MockConfig::instant()));
//! let scanner = DeviceScanner::new(Arc::clone(&backend));
//! scanner.start_scan().await?;
//! ```

mod mock;

pub use mock::{MockBackend, MockConfig};

use async_trait::async_trait;
use thiserror::Error;
use vault_types::{
    Device, DeviceId, Message, MessagePlatform, MobileDevice, MobilePlatform, Permissions,
    TextMessage,
};

/// Backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The device could not be reached.
    #[error("device unavailable: {0}")]
    Unavailable(String),

    /// The device owner refused access.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Any other failure reported by the platform.
    #[error("backend failure: {0}")]
    Failed(String),
}

/// Device and messaging-platform operations used by the services.
///
/// Implementations may take as long as the real device does; callers never
/// impose a timeout.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Find phones available for backup.
    async fn discover_devices(&self) -> Result<Vec<Device>, BackendError>;

    /// Sync one phone and report how many new messages it had.
    async fn sync_device(&self, device: &Device) -> Result<u64, BackendError>;

    /// Pull messages from a device for each requested platform.
    async fn fetch_messages(
        &self,
        device_id: &DeviceId,
        platforms: &[MessagePlatform],
    ) -> Result<Vec<Message>, BackendError>;

    /// Find mobile devices reachable from `host`.
    async fn discover_nearby(&self, host: MobilePlatform)
        -> Result<Vec<MobileDevice>, BackendError>;

    /// Ask the owner of `device` for access and return what was granted.
    async fn request_permissions(&self, device: &MobileDevice)
        -> Result<Permissions, BackendError>;

    /// Read the text messages stored on `device`.
    async fn read_texts(&self, device: &MobileDevice) -> Result<Vec<TextMessage>, BackendError>;
}
