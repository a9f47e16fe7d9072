//! Derived views over the accumulated message list.

use vault_types::{Message, MessagePlatform, SyncStats};

/// Summarize `messages`.
///
/// Computed from scratch on every call; nothing is cached, so the totals
/// always agree with the list they were derived from.
pub fn compute_stats(messages: &[Message], sync_in_progress: bool) -> SyncStats {
    let sms_messages = messages
        .iter()
        .filter(|m| m.platform == MessagePlatform::Sms)
        .count();
    let whatsapp_messages = messages
        .iter()
        .filter(|m| m.platform == MessagePlatform::WhatsApp)
        .count();

    SyncStats {
        total_messages: messages.len(),
        sms_messages,
        whatsapp_messages,
        last_sync: messages.iter().map(|m| m.timestamp).max(),
        sync_in_progress,
    }
}

/// Sort newest first. Ties keep no particular order.
pub fn sort_newest_first(messages: &mut [Message]) {
    messages.sort_unstable_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
