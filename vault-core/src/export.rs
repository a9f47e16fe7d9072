//! Backup export document.
//!
//! The export is a convenience snapshot of the in-memory message list, not a
//! durable storage format. It carries a version number so a later import can
//! at least recognize what it is looking at.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use vault_types::{Message, SyncStats, Timestamp};

use crate::stats::{compute_stats, sort_newest_first};

/// Version stamped into every export.
pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Everything written to a backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Always [`EXPORT_FORMAT_VERSION`].
    pub version: u32,
    /// When the export was produced.
    pub exported_at: Timestamp,
    /// Summary of `messages`.
    pub stats: SyncStats,
    /// Messages, newest first.
    pub messages: Vec<Message>,
}

impl ExportDocument {
    /// Build a document from the current message list.
    pub fn new(mut messages: Vec<Message>, exported_at: Timestamp) -> Self {
        sort_newest_first(&mut messages);
        Self {
            version: EXPORT_FORMAT_VERSION,
            exported_at,
            stats: compute_stats(&messages, false),
            messages,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Date-stamped file name for this export (UTC date of `exported_at`).
    pub fn file_name(&self) -> String {
        let date = DateTime::<Utc>::from_timestamp_millis(self.exported_at.as_millis() as i64)
            .map(|dt| dt.date_naive())
            .unwrap_or_default();
        file_name_for(date)
    }
}

/// `messages-backup-YYYY-MM-DD.json`
pub fn file_name_for(date: NaiveDate) -> String {
    format!("messages-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_types::{DeviceId, MessageId, MessagePlatform};

    fn message(at: u64) -> Message {
        Message {
            id: MessageId::new(format!("dev1-sms-{}", at)),
            contact: "Emily Davis".into(),
            content: "Project update is ready".into(),
            timestamp: Timestamp::from_millis(at),
            platform: MessagePlatform::Sms,
            device_id: DeviceId::from("dev1"),
        }
    }

    #[test]
    fn document_sorts_and_summarizes() {
        let doc = ExportDocument::new(vec![message(1), message(3), message(2)], Timestamp::from_millis(0));
        let order: Vec<u64> = doc.messages.iter().map(|m| m.timestamp.as_millis()).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(doc.stats.total_messages, 3);
        assert_eq!(doc.stats.sms_messages, 3);
        assert!(!doc.stats.sync_in_progress);
    }

    #[test]
    fn json_contains_version_and_messages() {
        let doc = ExportDocument::new(vec![message(7)], Timestamp::from_millis(0));
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(json["version"], EXPORT_FORMAT_VERSION);
        assert_eq!(json["stats"]["totalMessages"], 1);
        assert_eq!(json["messages"][0]["deviceId"], "dev1");
        assert_eq!(json["messages"][0]["platform"], "sms");
    }

    #[test]
    fn file_name_uses_utc_date() {
        // 2024-01-15T14:30:00Z
        let doc = ExportDocument::new(vec![], Timestamp::from_millis(1_705_329_000_000));
        assert_eq!(doc.file_name(), "messages-backup-2024-01-15.json");
    }

    #[test]
    fn file_name_for_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(file_name_for(date), "messages-backup-2026-03-07.json");
    }
}
