//! Seedable stand-in for real device data.
//!
//! No device or messaging-platform integration exists yet, so discovery and
//! sync produce plausible fake records. Everything here is deterministic for
//! a given seed, which is what makes the services testable; timing (the
//! simulated device latency) is the caller's concern.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vault_types::{
    Device, DeviceId, DevicePlatform, DeviceStatus, Direction, Message, MessageId,
    MessagePlatform, MobileDevice, MobileDeviceKind, MobilePlatform, MobileStatus, Permissions,
    TextMessage, Timestamp,
};

/// Upper bound (exclusive) on messages a single device sync discovers.
pub const DEVICE_SYNC_MAX_NEW: u64 = 50;

/// Contacts used for synced SMS/WhatsApp messages.
pub const MESSAGE_CONTACTS: [&str; 5] = [
    "John Doe",
    "Sarah Wilson",
    "Mike Johnson",
    "Emily Davis",
    "Team Group",
];

const MESSAGE_TEMPLATES: [&str; 7] = [
    "Hey, how are you doing?",
    "Meeting at 3 PM today",
    "Don't forget the documents",
    "Thanks for the help!",
    "See you tomorrow",
    "Call me when you get this",
    "Project update is ready",
];

/// Addresses used for texts read from a mobile device.
pub const TEXT_CONTACTS: [&str; 7] = ["Mom", "Dad", "Sarah", "John", "Work Team", "Doctor", "Bank"];

const TEXT_TEMPLATES: [&str; 10] = [
    "Hey, how are you?",
    "Running late, be there in 10 mins",
    "Don't forget about dinner tonight",
    "Thanks for your help!",
    "Can you call me when you get this?",
    "Meeting moved to 3 PM",
    "Happy birthday! 🎉",
    "See you tomorrow",
    "Traffic is crazy today",
    "Got your message, will respond later",
];

const MESSAGE_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const TEXT_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);
const TEXTS_PER_THREAD: usize = 5;

/// Fake data source backed by a seedable RNG.
#[derive(Debug)]
pub struct MockGenerator {
    rng: StdRng,
}

impl MockGenerator {
    /// Deterministic generator: the same seed yields the same data.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// The phones a device scan finds. Always the same two handsets.
    pub fn scanned_devices(&self, now: Timestamp) -> Vec<Device> {
        vec![
            Device {
                id: DeviceId::from("1"),
                name: "John's iPhone".to_string(),
                platform: DevicePlatform::Ios,
                status: DeviceStatus::Connected,
                last_sync: Some(now.saturating_sub(Duration::from_secs(30 * 60))),
                message_count: Some(1247),
            },
            Device {
                id: DeviceId::from("2"),
                name: "Samsung Galaxy S23".to_string(),
                platform: DevicePlatform::Android,
                status: DeviceStatus::Connected,
                last_sync: Some(now.saturating_sub(Duration::from_secs(15 * 60))),
                message_count: Some(892),
            },
        ]
    }

    /// New messages found by one device sync, in `0..DEVICE_SYNC_MAX_NEW`.
    pub fn sync_increment(&mut self) -> u64 {
        self.rng.gen_range(0..DEVICE_SYNC_MAX_NEW)
    }

    /// `count` messages for one platform, dated within the last week.
    ///
    /// Ids are `<device>-<platform>-<n>`; the same device and platform always
    /// produce the same ids, so repeated syncs create duplicates.
    pub fn platform_messages(
        &mut self,
        device_id: &DeviceId,
        platform: MessagePlatform,
        count: usize,
        now: Timestamp,
    ) -> Vec<Message> {
        (0..count)
            .map(|i| Message {
                id: MessageId::new(format!("{}-{}-{}", device_id, platform, i)),
                contact: self.pick(&MESSAGE_CONTACTS).to_string(),
                content: self.pick(&MESSAGE_TEMPLATES).to_string(),
                timestamp: self.within(now, MESSAGE_WINDOW),
                platform,
                device_id: device_id.clone(),
            })
            .collect()
    }

    /// Devices near a native host. A web host cannot discover anything.
    pub fn nearby_devices(&self, host: MobilePlatform) -> Vec<MobileDevice> {
        if host == MobilePlatform::Web {
            return Vec::new();
        }
        vec![MobileDevice {
            id: DeviceId::from("bluetooth-device-1"),
            name: "Partner's Phone".to_string(),
            kind: MobileDeviceKind::Bluetooth,
            platform: MobilePlatform::Android,
            status: MobileStatus::Connected,
            message_count: Some(1247),
            last_sync: None,
            permissions: Permissions::none(),
        }]
    }

    /// `count` texts grouped into threads of five, dated within 30 days.
    pub fn text_messages(
        &mut self,
        device_id: &DeviceId,
        count: usize,
        now: Timestamp,
    ) -> Vec<TextMessage> {
        (0..count)
            .map(|i| TextMessage {
                id: MessageId::new(format!("msg-{}-{}", device_id, i)),
                thread_id: format!("thread-{}", i / TEXTS_PER_THREAD),
                address: self.pick(&TEXT_CONTACTS).to_string(),
                body: self.pick(&TEXT_TEMPLATES).to_string(),
                date: self.within(now, TEXT_WINDOW),
                direction: if self.rng.gen_bool(0.5) {
                    Direction::Inbox
                } else {
                    Direction::Sent
                },
                read: self.rng.gen_bool(0.7),
            })
            .collect()
    }

    fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }

    fn within(&mut self, now: Timestamp, window: Duration) -> Timestamp {
        let ago = self.rng.gen_range(0..window.as_millis() as u64);
        now.saturating_sub(Duration::from_millis(ago))
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
