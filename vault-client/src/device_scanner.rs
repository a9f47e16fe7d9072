//! Device scanner service.
//!
//! Holds the list of discovered phones and a scanning flag. Every state
//! change is followed by a [`ScanResult`] notification carrying the full
//! snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use vault_core::{Notifier, Subscription};
use vault_types::{Device, DeviceId, DeviceStatus, ScanResult, Timestamp};

use crate::backend::Backend;
use crate::error::ClientError;

/// Discovers phones and syncs them one at a time.
pub struct DeviceScanner<B: Backend> {
    backend: Arc<B>,
    state: Mutex<ScanResult>,
    notifier: Notifier<ScanResult>,
}

impl<B: Backend> DeviceScanner<B> {
    /// Create a scanner with no known devices.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(ScanResult::default()),
            notifier: Notifier::new(),
        }
    }

    /// Register a listener for scan snapshots.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ScanResult) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ScanResult {
        self.lock().clone()
    }

    /// Known devices.
    pub fn devices(&self) -> Vec<Device> {
        self.lock().devices.clone()
    }

    /// Whether a scan is running.
    pub fn is_scanning(&self) -> bool {
        self.lock().scanning
    }

    /// Scan for phones and replace the device list with what was found.
    ///
    /// Subscribers are notified when the scan starts and again when it ends.
    /// If discovery fails the list is left unchanged.
    pub async fn start_scan(&self) -> Result<(), ClientError> {
        info!("Device scan started");
        self.update(|state| state.scanning = true);

        match self.backend.discover_devices().await {
            Ok(devices) => {
                info!(found = devices.len(), "Device scan finished");
                self.update(|state| {
                    state.devices = devices;
                    state.scanning = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!("Device scan failed: {}", e);
                self.update(|state| state.scanning = false);
                Err(e.into())
            }
        }
    }

    /// Sync one device.
    ///
    /// Unknown ids are ignored. While the sync runs the device reports
    /// [`DeviceStatus::Syncing`]; afterwards it is connected again with an
    /// updated last-sync time and message count.
    pub async fn sync_device(&self, id: &DeviceId) -> Result<(), ClientError> {
        let device = {
            let mut state = self.lock();
            let Some(device) = state.devices.iter_mut().find(|d| &d.id == id) else {
                debug!(device = %id, "Sync requested for unknown device, ignoring");
                return Ok(());
            };
            device.status = DeviceStatus::Syncing;
            device.clone()
        };
        info!(device = %id, "Device sync started");
        self.publish();

        let outcome = self.backend.sync_device(&device).await;

        self.update(|state| {
            // A rescan may have replaced the list while the sync was running.
            let Some(device) = state.devices.iter_mut().find(|d| &d.id == id) else {
                debug!(device = %id, "Device disappeared during sync");
                return;
            };
            match &outcome {
                Ok(new_messages) => {
                    device.status = DeviceStatus::Connected;
                    device.last_sync = Some(Timestamp::now());
                    device.message_count = Some(device.message_count.unwrap_or(0) + new_messages);
                }
                Err(_) => device.status = DeviceStatus::Disconnected,
            }
        });

        match outcome {
            Ok(new_messages) => {
                info!(device = %id, new_messages, "Device sync finished");
                Ok(())
            }
            Err(e) => {
                warn!(device = %id, "Device sync failed: {}", e);
                Err(e.into())
            }
        }
    }

    fn update(&self, apply: impl FnOnce(&mut ScanResult)) {
        apply(&mut self.lock());
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        debug!(
            devices = snapshot.devices.len(),
            scanning = snapshot.scanning,
            "Notifying scan listeners"
        );
        self.notifier.notify(&snapshot);
    }

    fn lock(&self) -> MutexGuard<'_, ScanResult> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockBackend, MockConfig};
    use std::time::Duration;

    fn scanner() -> (Arc<MockBackend>, DeviceScanner<MockBackend>) {
        let backend = Arc::new(MockBackend::new(MockConfig::default().with_seed(11)));
        let scanner = DeviceScanner::new(Arc::clone(&backend));
        (backend, scanner)
    }

    fn record(scanner: &DeviceScanner<MockBackend>) -> (Arc<Mutex<Vec<ScanResult>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sub = {
            let seen = Arc::clone(&seen);
            scanner.subscribe(move |snapshot| seen.lock().unwrap().push(snapshot.clone()))
        };
        (seen, sub)
    }

    #[tokio::test(start_paused = true)]
    async fn scan_notifies_start_and_finish() {
        let (_, scanner) = scanner();
        let (seen, _sub) = record(&scanner);

        scanner.start_scan().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].scanning);
        assert!(seen[0].devices.is_empty());
        assert!(!seen[1].scanning);
        assert_eq!(seen[1].devices.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn scan_leaves_flag_cleared_and_devices_present() {
        let (_, scanner) = scanner();
        scanner.start_scan().await.unwrap();

        assert!(!scanner.is_scanning());
        assert!(!scanner.devices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn scan_takes_the_configured_delay() {
        let (_, scanner) = scanner();
        let start = tokio::time::Instant::now();

        scanner.start_scan().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn rescan_replaces_devices() {
        let (_, scanner) = scanner();
        scanner.start_scan().await.unwrap();
        scanner.start_scan().await.unwrap();

        assert_eq!(scanner.devices().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_scan_keeps_previous_devices() {
        let (backend, scanner) = scanner();
        scanner.start_scan().await.unwrap();
        let before = scanner.devices();

        backend.fail_next_discover("bluetooth off");
        let err = scanner.start_scan().await.unwrap_err();

        assert!(matches!(err, ClientError::Backend(_)));
        assert!(!scanner.is_scanning());
        assert_eq!(scanner.devices(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn sync_unknown_device_is_silent_noop() {
        let (_, scanner) = scanner();
        scanner.start_scan().await.unwrap();
        let before = scanner.snapshot();
        let (seen, _sub) = record(&scanner);

        scanner.sync_device(&DeviceId::from("nope")).await.unwrap();

        assert_eq!(scanner.snapshot(), before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_marks_syncing_then_connected() {
        let (_, scanner) = scanner();
        scanner.start_scan().await.unwrap();
        let id = DeviceId::from("2");
        let before = scanner.snapshot().device(&id).cloned().unwrap();
        let (seen, _sub) = record(&scanner);

        scanner.sync_device(&id).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].device(&id).unwrap().status, DeviceStatus::Syncing);

        let after = seen[1].device(&id).unwrap();
        assert_eq!(after.status, DeviceStatus::Connected);
        assert!(after.last_sync >= before.last_sync);
        let gained = after.message_count.unwrap() - before.message_count.unwrap();
        assert!(gained < vault_core::DEVICE_SYNC_MAX_NEW);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_sync_disconnects_device() {
        let (backend, scanner) = scanner();
        scanner.start_scan().await.unwrap();
        let id = DeviceId::from("1");

        backend.fail_next_sync("link lost");
        assert!(scanner.sync_device(&id).await.is_err());

        let device = scanner.snapshot().device(&id).cloned().unwrap();
        assert_eq!(device.status, DeviceStatus::Disconnected);
        assert_eq!(device.message_count, Some(1247));
    }

    #[tokio::test(start_paused = true)]
    async fn unsubscribed_listener_sees_nothing() {
        let (_, scanner) = scanner();
        let (seen, sub) = record(&scanner);
        sub.unsubscribe();

        scanner.start_scan().await.unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }
}
