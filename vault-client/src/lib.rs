//! # msgvault-client
//!
//! Notifier services for msgvault, a phone message backup tool.
//!
//! Each service owns a piece of in-memory state and pushes a full snapshot
//! to its subscribers whenever that state changes.
//!
//! ## Services
//!
//! - **DeviceScanner**: discovers phones and syncs them one at a time
//! - **MessageSync**: accumulates SMS/WhatsApp messages and derives stats
//! - **MobileDeviceScanner**: host device, nearby phones, permissions and
//!   text-message reads
//! - **Backend abstraction**: pluggable device layer (mock today)
//!
//! ## Example
//!
//! ```ignore
//! use msgvault_client::{MessageSync, MockBackend, MockConfig};
//! use vault_types::{DeviceId, MessagePlatform};
//!
//! let backend = Arc::new(MockBackend::new(MockConfig::instant()));
//! let sync = MessageSync::new(backend);
//! let _sub = sync.subscribe(|stats| println!("{} messages", stats.total_messages));
//!
//! sync.sync_messages(&DeviceId::from("1"), &MessagePlatform::ALL).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod device_scanner;
pub mod error;
pub mod message_sync;
pub mod mobile_scanner;
pub mod notice;

pub use backend::{Backend, BackendError, MockBackend, MockConfig};
pub use device_scanner::DeviceScanner;
pub use error::ClientError;
pub use message_sync::MessageSync;
pub use mobile_scanner::MobileDeviceScanner;
pub use notice::{Notice, Severity};
