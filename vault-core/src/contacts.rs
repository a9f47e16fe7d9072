//! Queries over synced messages: text search and per-contact rollups.

use std::collections::HashMap;

use serde::Serialize;
use vault_types::{Message, MessagePlatform, Timestamp};

/// Messages whose contact or body contains `query`, ignoring case.
///
/// An empty (or all-whitespace) query matches everything. Input order is
/// preserved.
pub fn search_messages<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return messages.iter().collect();
    }
    messages
        .iter()
        .filter(|m| {
            m.contact.to_lowercase().contains(&needle) || m.content.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Message activity for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    /// Contact display name.
    pub contact: String,
    /// All messages with this contact.
    pub message_count: usize,
    /// SMS messages with this contact.
    pub sms_count: usize,
    /// WhatsApp messages with this contact.
    pub whatsapp_count: usize,
    /// Newest message with this contact.
    pub last_message: Timestamp,
}

impl ContactSummary {
    /// Whether any message with this contact came from `platform`.
    pub fn uses(&self, platform: MessagePlatform) -> bool {
        match platform {
            MessagePlatform::Sms => self.sms_count > 0,
            MessagePlatform::WhatsApp => self.whatsapp_count > 0,
        }
    }
}

/// Roll messages up per contact, most recently active first.
///
/// Contacts with the same latest timestamp are ordered by name so the output
/// is stable.
pub fn contact_summaries(messages: &[Message]) -> Vec<ContactSummary> {
    let mut by_contact: HashMap<&str, ContactSummary> = HashMap::new();

    for message in messages {
        let entry = by_contact
            .entry(message.contact.as_str())
            .or_insert_with(|| ContactSummary {
                contact: message.contact.clone(),
                message_count: 0,
                sms_count: 0,
                whatsapp_count: 0,
                last_message: message.timestamp,
            });
        entry.message_count += 1;
        match message.platform {
            MessagePlatform::Sms => entry.sms_count += 1,
            MessagePlatform::WhatsApp => entry.whatsapp_count += 1,
        }
        entry.last_message = entry.last_message.max(message.timestamp);
    }

    let mut summaries: Vec<ContactSummary> = by_contact.into_values().collect();
    summaries.sort_by(|a, b| {
        b.last_message
            .cmp(&a.last_message)
            .then_with(|| a.contact.cmp(&b.contact))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_types::{DeviceId, MessageId};

    fn message(contact: &str, content: &str, at: u64, platform: MessagePlatform) -> Message {
        Message {
            id: MessageId::new(format!("{}-{}", contact, at)),
            contact: contact.into(),
            content: content.into(),
            timestamp: Timestamp::from_millis(at),
            platform,
            device_id: DeviceId::from("dev1"),
        }
    }

    fn sample() -> Vec<Message> {
        vec![
            message("John Doe", "Meeting at 3 PM today", 10, MessagePlatform::Sms),
            message("Sarah Wilson", "Thanks for the help!", 30, MessagePlatform::WhatsApp),
            message("John Doe", "See you tomorrow", 20, MessagePlatform::WhatsApp),
        ]
    }

    #[test]
    fn search_matches_contact_case_insensitively() {
        let messages = sample();
        let hits = search_messages(&messages, "JOHN");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn search_matches_body() {
        let messages = sample();
        let hits = search_messages(&messages, "help");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].contact, "Sarah Wilson");
    }

    #[test]
    fn empty_query_matches_everything() {
        let messages = sample();
        assert_eq!(search_messages(&messages, "  ").len(), 3);
    }

    #[test]
    fn search_without_hits_is_empty() {
        let messages = sample();
        assert!(search_messages(&messages, "dentist").is_empty());
    }

    #[test]
    fn summaries_roll_up_per_contact() {
        let summaries = contact_summaries(&sample());
        assert_eq!(summaries.len(), 2);

        // Sarah's latest message (30) is newer than John's (20).
        assert_eq!(summaries[0].contact, "Sarah Wilson");
        assert_eq!(summaries[1].contact, "John Doe");

        let john = &summaries[1];
        assert_eq!(john.message_count, 2);
        assert_eq!(john.sms_count, 1);
        assert_eq!(john.whatsapp_count, 1);
        assert_eq!(john.last_message, Timestamp::from_millis(20));
        assert!(john.uses(MessagePlatform::Sms));
        assert!(!summaries[0].uses(MessagePlatform::Sms));
    }

    #[test]
    fn summary_ties_break_by_name() {
        let messages = vec![
            message("Zed", "hi", 5, MessagePlatform::Sms),
            message("Amy", "hi", 5, MessagePlatform::Sms),
        ];
        let summaries = contact_summaries(&messages);
        assert_eq!(summaries[0].contact, "Amy");
        assert_eq!(summaries[1].contact, "Zed");
    }
}
