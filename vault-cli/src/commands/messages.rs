//! List synced messages, newest first.

use anyhow::Result;
use vault_types::{DeviceId, Message};

use super::{format_time, Session};

/// Longest body shown before truncation.
const PREVIEW_CHARS: usize = 60;

/// Run the messages command.
pub async fn run(
    session: &Session,
    device: &DeviceId,
    search: Option<&str>,
    limit: usize,
) -> Result<()> {
    let service = session.synced_messages(device, &[]).await?;
    let matches = service.search(search.unwrap_or(""));

    println!();
    match search {
        Some(query) => println!("{} messages matching {:?}:", matches.len(), query),
        None => println!("{} messages:", matches.len()),
    }
    for message in matches.iter().take(limit) {
        println!("  {}", describe(message));
    }
    if matches.len() > limit {
        println!("  ... {} more", matches.len() - limit);
    }
    Ok(())
}

fn describe(message: &Message) -> String {
    format!(
        "{} [{}] {}: {}",
        format_time(message.timestamp),
        message.platform.as_str(),
        message.contact,
        preview(&message.content)
    )
}

fn preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use tempfile::tempdir;
    use vault_types::{MessageId, MessagePlatform, Timestamp};

    #[tokio::test]
    async fn list_with_limit() {
        let dir = tempdir().unwrap();
        let result = run(&session(dir.path()), &DeviceId::from("1"), None, 5).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn search_without_hits_succeeds() {
        let dir = tempdir().unwrap();
        let result = run(
            &session(dir.path()),
            &DeviceId::from("1"),
            Some("zzz-no-such-text"),
            5,
        )
        .await;
        assert!(result.is_ok());
    }

    #[test]
    fn describe_formats_line() {
        let message = Message {
            id: MessageId::new("1-sms-0"),
            contact: "Alice Smith".to_string(),
            content: "See you soon!".to_string(),
            timestamp: Timestamp::from_millis(0),
            platform: MessagePlatform::Sms,
            device_id: DeviceId::from("1"),
        };
        assert_eq!(
            describe(&message),
            "1970-01-01 00:00 [sms] Alice Smith: See you soon!"
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(100);
        let shown = preview(&body);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }
}
