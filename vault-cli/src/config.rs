//! Configuration loading for msgvault.
//!
//! Settings come from a TOML file (default: `msgvault.toml` in the data
//! directory). Every field has a default, so a missing file is not an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vault_client::MockConfig;
use vault_types::{MessagePlatform, MobilePlatform};

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "msgvault.toml";

/// Root configuration for msgvault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Simulated device behaviour.
    #[serde(default)]
    pub mock: MockSettings,
    /// Backup preferences.
    #[serde(default)]
    pub backup: BackupSettings,
}

/// Simulated device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MockSettings {
    /// Device discovery time in milliseconds (default: 3000).
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    /// Device sync time in milliseconds (default: 5000).
    #[serde(default = "default_device_sync_delay_ms")]
    pub device_sync_delay_ms: u64,
    /// Message fetch time in milliseconds (default: 3000).
    #[serde(default = "default_message_sync_delay_ms")]
    pub message_sync_delay_ms: u64,
    /// Web permission prompt time in milliseconds (default: 2000).
    #[serde(default = "default_permission_delay_ms")]
    pub permission_delay_ms: u64,
    /// Messages generated per platform (default: 50).
    #[serde(default = "default_messages_per_platform")]
    pub messages_per_platform: usize,
    /// Texts read per mobile sync (default: 50).
    #[serde(default = "default_texts_per_sync")]
    pub texts_per_sync: usize,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

/// Backup preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackupSettings {
    /// Platform the mobile scanner runs on (default: android).
    #[serde(default = "default_host_platform")]
    pub host_platform: MobilePlatform,
    /// Platforms synced when none are given on the command line.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<MessagePlatform>,
}

fn default_scan_delay_ms() -> u64 {
    3000
}

fn default_device_sync_delay_ms() -> u64 {
    5000
}

fn default_message_sync_delay_ms() -> u64 {
    3000
}

fn default_permission_delay_ms() -> u64 {
    2000
}

fn default_messages_per_platform() -> usize {
    50
}

fn default_texts_per_sync() -> usize {
    50
}

fn default_host_platform() -> MobilePlatform {
    MobilePlatform::Android
}

fn default_platforms() -> Vec<MessagePlatform> {
    MessagePlatform::ALL.to_vec()
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay_ms(),
            device_sync_delay_ms: default_device_sync_delay_ms(),
            message_sync_delay_ms: default_message_sync_delay_ms(),
            permission_delay_ms: default_permission_delay_ms(),
            messages_per_platform: default_messages_per_platform(),
            texts_per_sync: default_texts_per_sync(),
            seed: None,
        }
    }
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            host_platform: default_host_platform(),
            platforms: default_platforms(),
        }
    }
}

impl MockSettings {
    /// Backend configuration; `no_delay` zeroes every delay.
    pub fn to_mock_config(&self, no_delay: bool) -> MockConfig {
        let delay = |ms: u64| {
            if no_delay {
                Duration::ZERO
            } else {
                Duration::from_millis(ms)
            }
        };
        MockConfig {
            scan_delay: delay(self.scan_delay_ms),
            device_sync_delay: delay(self.device_sync_delay_ms),
            message_sync_delay: delay(self.message_sync_delay_ms),
            permission_delay: delay(self.permission_delay_ms),
            text_sync_delay: delay(self.message_sync_delay_ms),
            messages_per_platform: self.messages_per_platform,
            texts_per_sync: self.texts_per_sync,
            seed: self.seed,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `path` if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
