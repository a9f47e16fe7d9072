//! Mock backend.
//!
//! Simulates device latency with fixed delays and fabricates records with a
//! [`MockGenerator`]. Failures can be injected per operation for testing.

use super::{Backend, BackendError};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use vault_core::MockGenerator;
use vault_types::{
    Device, DeviceId, Message, MessagePlatform, MobileDevice, MobilePlatform, Permissions,
    TextMessage, Timestamp,
};

/// Timing and volume of the simulated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Device and nearby-device discovery time.
    pub scan_delay: Duration,
    /// Time for one device sync.
    pub device_sync_delay: Duration,
    /// Time for one message fetch, regardless of platform count.
    pub message_sync_delay: Duration,
    /// Permission prompt time on a web host (native prompts are instant).
    pub permission_delay: Duration,
    /// Time to read texts from a mobile device.
    pub text_sync_delay: Duration,
    /// Messages produced per platform by `fetch_messages`.
    pub messages_per_platform: usize,
    /// Texts produced by `read_texts`.
    pub texts_per_sync: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            scan_delay: Duration::from_millis(3000),
            device_sync_delay: Duration::from_millis(5000),
            message_sync_delay: Duration::from_millis(3000),
            permission_delay: Duration::from_millis(2000),
            text_sync_delay: Duration::from_millis(3000),
            messages_per_platform: 50,
            texts_per_sync: 50,
            seed: None,
        }
    }
}

impl MockConfig {
    /// Default volumes with every delay zeroed.
    pub fn instant() -> Self {
        Self {
            scan_delay: Duration::ZERO,
            device_sync_delay: Duration::ZERO,
            message_sync_delay: Duration::ZERO,
            permission_delay: Duration::ZERO,
            text_sync_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Simulated device backend.
#[derive(Debug)]
pub struct MockBackend {
    config: MockConfig,
    inner: Mutex<MockBackendInner>,
}

#[derive(Debug)]
struct MockBackendInner {
    generator: MockGenerator,
    fail_next_discover: Option<String>,
    fail_next_sync: Option<String>,
    fail_next_fetch: Option<String>,
    fail_next_permissions: Option<String>,
    fail_next_read: Option<String>,
}

impl MockBackend {
    /// Create a mock backend.
    pub fn new(config: MockConfig) -> Self {
        let generator = MockGenerator::new(config.seed);
        Self {
            config,
            inner: Mutex::new(MockBackendInner {
                generator,
                fail_next_discover: None,
                fail_next_sync: None,
                fail_next_fetch: None,
                fail_next_permissions: None,
                fail_next_read: None,
            }),
        }
    }

    /// The configuration this backend was built with.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Cause the next device or nearby-device discovery to fail.
    pub fn fail_next_discover(&self, error: &str) {
        self.lock().fail_next_discover = Some(error.to_string());
    }

    /// Cause the next device sync to fail.
    pub fn fail_next_sync(&self, error: &str) {
        self.lock().fail_next_sync = Some(error.to_string());
    }

    /// Cause the next message fetch to fail.
    pub fn fail_next_fetch(&self, error: &str) {
        self.lock().fail_next_fetch = Some(error.to_string());
    }

    /// Cause the next permission request to fail.
    pub fn fail_next_permissions(&self, error: &str) {
        self.lock().fail_next_permissions = Some(error.to_string());
    }

    /// Cause the next text read to fail.
    pub fn fail_next_read(&self, error: &str) {
        self.lock().fail_next_read = Some(error.to_string());
    }

    // Never held across an await.
    fn lock(&self) -> MutexGuard<'_, MockBackendInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn injected(slot: &mut Option<String>) -> Result<(), BackendError> {
    match slot.take() {
        Some(error) => Err(BackendError::Failed(error)),
        None => Ok(()),
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn discover_devices(&self) -> Result<Vec<Device>, BackendError> {
        pause(self.config.scan_delay).await;

        let mut inner = self.lock();
        injected(&mut inner.fail_next_discover)?;
        Ok(inner.generator.scanned_devices(Timestamp::now()))
    }

    async fn sync_device(&self, _device: &Device) -> Result<u64, BackendError> {
        pause(self.config.device_sync_delay).await;

        let mut inner = self.lock();
        injected(&mut inner.fail_next_sync)?;
        Ok(inner.generator.sync_increment())
    }

    async fn fetch_messages(
        &self,
        device_id: &DeviceId,
        platforms: &[MessagePlatform],
    ) -> Result<Vec<Message>, BackendError> {
        // Records are stamped before the delay, as a real pull would be.
        let now = Timestamp::now();
        let batch = {
            let mut inner = self.lock();
            injected(&mut inner.fail_next_fetch)?;
            platforms
                .iter()
                .flat_map(|&platform| {
                    inner.generator.platform_messages(
                        device_id,
                        platform,
                        self.config.messages_per_platform,
                        now,
                    )
                })
                .collect::<Vec<_>>()
        };

        pause(self.config.message_sync_delay).await;
        Ok(batch)
    }

    async fn discover_nearby(
        &self,
        host: MobilePlatform,
    ) -> Result<Vec<MobileDevice>, BackendError> {
        pause(self.config.scan_delay).await;

        let mut inner = self.lock();
        injected(&mut inner.fail_next_discover)?;
        Ok(inner.generator.nearby_devices(host))
    }

    async fn request_permissions(
        &self,
        device: &MobileDevice,
    ) -> Result<Permissions, BackendError> {
        if device.platform == MobilePlatform::Web {
            pause(self.config.permission_delay).await;
        }

        injected(&mut self.lock().fail_next_permissions)?;
        Ok(Permissions::all())
    }

    async fn read_texts(&self, device: &MobileDevice) -> Result<Vec<TextMessage>, BackendError> {
        let now = Timestamp::now();
        let texts = self
            .lock()
            .generator
            .text_messages(&device.id, self.config.texts_per_sync, now);

        pause(self.config.text_sync_delay).await;

        injected(&mut self.lock().fail_next_read)?;
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_types::CURRENT_DEVICE_ID;

    fn backend() -> MockBackend {
        MockBackend::new(MockConfig::instant().with_seed(7))
    }

    #[tokio::test]
    async fn discover_returns_fixed_devices() {
        let devices = backend().discover_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
    }

    #[tokio::test]
    async fn fetch_produces_count_per_platform() {
        let messages = backend()
            .fetch_messages(
                &DeviceId::from("dev1"),
                &[MessagePlatform::Sms, MessagePlatform::WhatsApp],
            )
            .await
            .unwrap();
        assert_eq!(messages.len(), 100);
        assert_eq!(
            messages
                .iter()
                .filter(|m| m.platform == MessagePlatform::Sms)
                .count(),
            50
        );
    }

    #[tokio::test]
    async fn fetch_with_no_platforms_is_empty() {
        let messages = backend()
            .fetch_messages(&DeviceId::from("dev1"), &[])
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let backend = backend();
        backend.fail_next_discover("radio off");

        let err = backend.discover_devices().await.unwrap_err();
        assert_eq!(err, BackendError::Failed("radio off".into()));

        assert!(backend.discover_devices().await.is_ok());
    }

    #[tokio::test]
    async fn permissions_grant_everything() {
        let device = MobileDevice::current(MobilePlatform::Android);
        let granted = backend().request_permissions(&device).await.unwrap();
        assert_eq!(granted, Permissions::all());
    }

    #[tokio::test]
    async fn read_texts_uses_device_id() {
        let device = MobileDevice::current(MobilePlatform::Ios);
        let texts = backend().read_texts(&device).await.unwrap();
        assert_eq!(texts.len(), 50);
        assert_eq!(texts[0].id.as_str(), format!("msg-{}-0", CURRENT_DEVICE_ID));
    }

    #[tokio::test(start_paused = true)]
    async fn default_delays_are_simulated() {
        let backend = MockBackend::new(MockConfig::default().with_seed(1));
        let start = tokio::time::Instant::now();

        backend.discover_devices().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn native_permission_prompt_is_instant() {
        let backend = MockBackend::new(MockConfig::default().with_seed(1));
        let start = tokio::time::Instant::now();

        backend
            .request_permissions(&MobileDevice::current(MobilePlatform::Android))
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        backend
            .request_permissions(&MobileDevice::current(MobilePlatform::Web))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
