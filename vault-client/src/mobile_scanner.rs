//! Mobile device scanner service.
//!
//! Tracks the device the app runs on plus any phones found nearby, the
//! permissions each has granted, and reads their text messages. Listeners
//! receive the full device list after every change.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use vault_core::{Notifier, Subscription};
use vault_types::{
    DeviceId, MobileDevice, MobileDeviceKind, MobilePlatform, MobileStatus, TextMessage,
    Timestamp,
};

use crate::backend::Backend;
use crate::error::ClientError;

#[derive(Debug)]
struct MobileState {
    devices: Vec<MobileDevice>,
    scanning: bool,
}

/// Mobile-side scanner with permission and text-sync support.
pub struct MobileDeviceScanner<B: Backend> {
    backend: Arc<B>,
    host: MobilePlatform,
    state: Mutex<MobileState>,
    notifier: Notifier<Vec<MobileDevice>>,
}

impl<B: Backend> MobileDeviceScanner<B> {
    /// Create a scanner seeded with the device for `host`.
    pub fn new(backend: Arc<B>, host: MobilePlatform) -> Self {
        Self {
            backend,
            host,
            state: Mutex::new(MobileState {
                devices: vec![MobileDevice::current(host)],
                scanning: false,
            }),
            notifier: Notifier::new(),
        }
    }

    /// The platform this scanner runs on.
    pub fn host(&self) -> MobilePlatform {
        self.host
    }

    /// Register a listener for device-list snapshots.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Vec<MobileDevice>) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    /// Known devices, current device first.
    pub fn devices(&self) -> Vec<MobileDevice> {
        self.lock().devices.clone()
    }

    /// Look up one device.
    pub fn device(&self, id: &DeviceId) -> Option<MobileDevice> {
        self.lock().devices.iter().find(|d| &d.id == id).cloned()
    }

    /// Whether a scan is running.
    pub fn is_scanning(&self) -> bool {
        self.lock().scanning
    }

    /// Look for nearby phones.
    ///
    /// The current device is kept and every other entry is replaced by what
    /// the scan found. A request made while a scan is running is ignored.
    /// Discovery failures are logged and leave the list unchanged.
    pub async fn scan_for_devices(&self) {
        {
            let mut state = self.lock();
            if state.scanning {
                debug!("Mobile scan already running, ignoring request");
                return;
            }
            state.scanning = true;
        }
        info!(host = %self.host, "Mobile scan started");
        self.publish();

        let outcome = self.backend.discover_nearby(self.host).await;

        self.update(|state| {
            state.scanning = false;
            match outcome {
                Ok(found) => {
                    info!(found = found.len(), "Mobile scan finished");
                    state
                        .devices
                        .retain(|d| d.kind == MobileDeviceKind::Current);
                    state.devices.extend(found);
                }
                Err(e) => warn!("Mobile scan failed: {}", e),
            }
        });
    }

    /// Ask a device for SMS, contacts and storage access.
    ///
    /// Returns `false` for an unknown id or when the request fails.
    pub async fn request_permissions(&self, id: &DeviceId) -> bool {
        let Some(device) = self.device(id) else {
            debug!(device = %id, "Permission request for unknown device");
            return false;
        };

        match self.backend.request_permissions(&device).await {
            Ok(granted) => {
                info!(device = %id, level = %granted.level(), "Permissions granted");
                self.update(|state| {
                    if let Some(device) = find(&mut state.devices, id) {
                        device.permissions = granted;
                    }
                });
                true
            }
            Err(e) => {
                warn!(device = %id, "Permission request failed: {}", e);
                false
            }
        }
    }

    /// Read the text messages stored on a device.
    ///
    /// Fails without touching state if the id is unknown. A device without
    /// SMS access is put into [`MobileStatus::Error`] and the call fails.
    pub async fn sync_messages(&self, id: &DeviceId) -> Result<Vec<TextMessage>, ClientError> {
        let device = {
            let mut state = self.lock();
            let device = find(&mut state.devices, id)
                .ok_or_else(|| ClientError::DeviceNotFound(id.clone()))?;
            if !device.permissions.sms {
                device.status = MobileStatus::Error;
                None
            } else {
                device.status = MobileStatus::Syncing;
                Some(device.clone())
            }
        };
        self.publish();

        let Some(device) = device else {
            warn!(device = %id, "Text sync refused, SMS permission missing");
            return Err(ClientError::SmsPermissionMissing(id.clone()));
        };

        info!(device = %id, "Text sync started");
        let outcome = self.backend.read_texts(&device).await;

        self.update(|state| {
            let Some(device) = find(&mut state.devices, id) else {
                return;
            };
            match &outcome {
                Ok(texts) => {
                    device.status = MobileStatus::Connected;
                    device.message_count = Some(texts.len() as u64);
                    device.last_sync = Some(Timestamp::now());
                }
                Err(_) => device.status = MobileStatus::Error,
            }
        });

        match outcome {
            Ok(texts) => {
                info!(device = %id, texts = texts.len(), "Text sync finished");
                Ok(texts)
            }
            Err(e) => {
                warn!(device = %id, "Text sync failed: {}", e);
                Err(e.into())
            }
        }
    }

    fn update(&self, apply: impl FnOnce(&mut MobileState)) {
        apply(&mut self.lock());
        self.publish();
    }

    fn publish(&self) {
        let devices = self.devices();
        debug!(devices = devices.len(), "Notifying mobile listeners");
        self.notifier.notify(&devices);
    }

    fn lock(&self) -> MutexGuard<'_, MobileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn find<'a>(devices: &'a mut [MobileDevice], id: &DeviceId) -> Option<&'a mut MobileDevice> {
    devices.iter_mut().find(|d| &d.id == id)
}
