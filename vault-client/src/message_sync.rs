//! Message sync service.
//!
//! Accumulates messages pulled from devices and publishes [`SyncStats`]
//! whenever the list or the in-progress flag changes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use vault_core::{
    compute_stats, contact_summaries, search_messages, sort_newest_first, ContactSummary,
    ExportDocument, Notifier, Subscription,
};
use vault_types::{DeviceId, Message, MessagePlatform, SyncStats, Timestamp};

use crate::backend::Backend;
use crate::error::ClientError;

#[derive(Debug, Default)]
struct SyncState {
    messages: Vec<Message>,
    // Overlapping syncs each hold one slot; the flag clears when all finish.
    in_flight: usize,
}

/// Pulls SMS/WhatsApp messages from devices into one append-only list.
pub struct MessageSync<B: Backend> {
    backend: Arc<B>,
    state: Mutex<SyncState>,
    notifier: Notifier<SyncStats>,
}

impl<B: Backend> MessageSync<B> {
    /// Create a service with no messages.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(SyncState::default()),
            notifier: Notifier::new(),
        }
    }

    /// Register a listener for stats snapshots.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SyncStats) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Pull messages for each platform in `platforms` and append them.
    ///
    /// Returns how many messages were appended. Nothing is deduplicated:
    /// syncing the same device twice stores every message twice.
    pub async fn sync_messages(
        &self,
        device_id: &DeviceId,
        platforms: &[MessagePlatform],
    ) -> Result<usize, ClientError> {
        info!(device = %device_id, ?platforms, "Message sync started");
        self.update(|state| state.in_flight += 1);

        let outcome = self.backend.fetch_messages(device_id, platforms).await;

        let appended = outcome.as_ref().map(Vec::len).unwrap_or(0);
        self.update(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            if let Ok(batch) = outcome.as_ref() {
                state.messages.extend(batch.iter().cloned());
            }
        });

        match outcome {
            Ok(_) => {
                info!(device = %device_id, appended, "Message sync finished");
                Ok(appended)
            }
            Err(e) => {
                warn!(device = %device_id, "Message sync failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Every message, newest first.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = self.lock().messages.clone();
        sort_newest_first(&mut messages);
        messages
    }

    /// Messages matching `query` in contact or body, newest first.
    pub fn search(&self, query: &str) -> Vec<Message> {
        let messages = self.messages();
        search_messages(&messages, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Per-contact activity, most recent first.
    pub fn contacts(&self) -> Vec<ContactSummary> {
        contact_summaries(&self.lock().messages)
    }

    /// Summary of the current list; recomputed on every call.
    pub fn stats(&self) -> SyncStats {
        let state = self.lock();
        compute_stats(&state.messages, state.in_flight > 0)
    }

    /// Snapshot of every message for a backup file.
    pub fn export(&self, exported_at: Timestamp) -> ExportDocument {
        ExportDocument::new(self.lock().messages.clone(), exported_at)
    }

    fn update(&self, apply: impl FnOnce(&mut SyncState)) {
        apply(&mut self.lock());
        let stats = self.stats();
        debug!(
            total = stats.total_messages,
            in_progress = stats.sync_in_progress,
            "Notifying sync listeners"
        );
        self.notifier.notify(&stats);
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
