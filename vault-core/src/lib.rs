//! # vault-core
//!
//! Pure logic for msgvault (no I/O, instant tests).
//!
//! Everything the notifier services need that does not touch a clock, a
//! timer, or a device lives here:
//!
//! - [`Notifier`] - subscriber registry with synchronous whole-snapshot fan-out
//! - [`compute_stats`] / [`sort_newest_first`] - derived message views
//! - [`search_messages`] / [`contact_summaries`] - message list queries
//! - [`ExportDocument`] - the JSON backup document
//! - [`MockGenerator`] - seedable stand-in for real device data
//!
//! The async services in `vault-client` own the state and drive these
//! functions; this crate never sleeps and never spawns.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contacts;
pub mod export;
pub mod mock;
pub mod notifier;
pub mod stats;

pub use contacts::{contact_summaries, search_messages, ContactSummary};
pub use export::{file_name_for, ExportDocument, EXPORT_FORMAT_VERSION};
pub use mock::{MockGenerator, DEVICE_SYNC_MAX_NEW, MESSAGE_CONTACTS, TEXT_CONTACTS};
pub use notifier::{Notifier, Subscription};
pub use stats::{compute_stats, sort_newest_first};
