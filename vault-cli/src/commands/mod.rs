//! CLI command implementations.

pub mod contacts;
pub mod export;
pub mod messages;
pub mod mobile;
pub mod scan;
pub mod sync;
pub mod sync_device;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use vault_client::{MessageSync, MockBackend, Notice};
use vault_types::{DeviceId, MessagePlatform, SyncStats, Timestamp};

use crate::config::Config;

/// Everything a command needs: settings plus one shared backend.
pub struct Session {
    /// Loaded configuration.
    pub config: Config,
    /// Where exports land by default.
    pub data_dir: PathBuf,
    backend: Arc<MockBackend>,
}

impl Session {
    /// Build the backend from `config`.
    pub fn new(config: Config, data_dir: PathBuf, no_delay: bool) -> Self {
        let backend = Arc::new(MockBackend::new(config.mock.to_mock_config(no_delay)));
        Self {
            config,
            data_dir,
            backend,
        }
    }

    /// Shared device backend.
    pub fn backend(&self) -> Arc<MockBackend> {
        Arc::clone(&self.backend)
    }

    /// Requested platforms, or the configured ones when none were given.
    pub fn platforms_or_default(&self, requested: &[MessagePlatform]) -> Vec<MessagePlatform> {
        if requested.is_empty() {
            self.config.backup.platforms.clone()
        } else {
            requested.to_vec()
        }
    }

    /// Create a message sync service and pull `device` into it.
    pub async fn synced_messages(
        &self,
        device: &DeviceId,
        platforms: &[MessagePlatform],
    ) -> Result<MessageSync<MockBackend>> {
        let platforms = self.platforms_or_default(platforms);
        let service = MessageSync::new(self.backend());

        println!("Syncing {} from {}...", platform_list(&platforms), device);
        if let Err(e) = service.sync_messages(device, &platforms).await {
            print_notice(&Notice::from_error(&e));
            return Err(e.into());
        }
        Ok(service)
    }
}

/// Print a notice; failures go to stderr.
pub fn print_notice(notice: &Notice) {
    if notice.is_destructive() {
        eprintln!("{notice}");
    } else {
        println!("{notice}");
    }
}

/// Print message totals.
pub fn print_stats(stats: &SyncStats) {
    println!("Messages:");
    println!("  Total:    {}", stats.total_messages);
    println!("  SMS:      {}", stats.sms_messages);
    println!("  WhatsApp: {}", stats.whatsapp_messages);
    match stats.last_sync {
        Some(ts) => println!("  Latest:   {}", format_time(ts)),
        None => println!("  Latest:   never"),
    }
}

/// Comma-separated platform names.
pub fn platform_list(platforms: &[MessagePlatform]) -> String {
    if platforms.is_empty() {
        return "nothing".to_string();
    }
    platforms
        .iter()
        .map(MessagePlatform::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a timestamp as UTC date and time.
pub fn format_time(ts: Timestamp) -> String {
    i64::try_from(ts.as_millis())
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Format a timestamp relative to `now`.
pub fn format_age(ts: Timestamp, now: Timestamp) -> String {
    let diff = now.as_millis().saturating_sub(ts.as_millis()) / 1000;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        format!("{} minutes ago", diff / 60)
    } else if diff < 86400 {
        format!("{} hours ago", diff / 3600)
    } else {
        format!("{} days ago", diff / 86400)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{BackupSettings, MockSettings};
    use std::path::Path;

    /// Instant, seeded session rooted at `dir`.
    pub(crate) fn session(dir: &Path) -> Session {
        let config = Config {
            mock: MockSettings {
                seed: Some(99),
                ..MockSettings::default()
            },
            backup: BackupSettings::default(),
        };
        Session::new(config, dir.to_path_buf(), true)
    }

    #[test]
    fn format_age_works() {
        let now = Timestamp::from_millis(10 * 86_400_000);
        let ago = |secs: u64| Timestamp::from_millis(now.as_millis() - secs * 1000);

        assert_eq!(format_age(now, now), "just now");
        assert!(format_age(ago(120), now).contains("minutes"));
        assert!(format_age(ago(7200), now).contains("hours"));
        assert!(format_age(ago(172_800), now).contains("days"));
    }

    #[test]
    fn format_time_is_utc() {
        assert_eq!(format_time(Timestamp::from_millis(0)), "1970-01-01 00:00");
    }

    #[test]
    fn platform_list_joins_names() {
        assert_eq!(platform_list(&MessagePlatform::ALL), "sms, whatsapp");
        assert_eq!(platform_list(&[]), "nothing");
    }

    #[test]
    fn empty_request_uses_configured_platforms() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(dir.path());

        assert_eq!(
            session.platforms_or_default(&[]),
            MessagePlatform::ALL.to_vec()
        );
        assert_eq!(
            session.platforms_or_default(&[MessagePlatform::Sms]),
            vec![MessagePlatform::Sms]
        );
    }
}
