//! Summarize synced messages per contact.

use anyhow::Result;
use vault_core::ContactSummary;
use vault_types::{DeviceId, MessagePlatform, Timestamp};

use super::{format_age, Session};

/// Run the contacts command.
pub async fn run(session: &Session, device: &DeviceId) -> Result<()> {
    let service = session.synced_messages(device, &[]).await?;
    let contacts = service.contacts();
    let now = Timestamp::now();

    println!();
    println!("{} contacts:", contacts.len());
    for contact in &contacts {
        println!("  {}", describe(contact, now));
    }
    Ok(())
}

fn describe(contact: &ContactSummary, now: Timestamp) -> String {
    let platforms: Vec<&str> = MessagePlatform::ALL
        .iter()
        .filter(|&&p| contact.uses(p))
        .map(MessagePlatform::as_str)
        .collect();
    format!(
        "{}: {} messages ({} sms, {} whatsapp) via {}, last {}",
        contact.contact,
        contact.message_count,
        contact.sms_count,
        contact.whatsapp_count,
        platforms.join("+"),
        format_age(contact.last_message, now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use tempfile::tempdir;

    #[tokio::test]
    async fn contacts_succeeds() {
        let dir = tempdir().unwrap();
        let result = run(&session(dir.path()), &DeviceId::from("2")).await;
        assert!(result.is_ok());
    }

    #[test]
    fn describe_lists_platforms() {
        let contact = ContactSummary {
            contact: "Bob Jones".to_string(),
            message_count: 3,
            sms_count: 1,
            whatsapp_count: 2,
            last_message: Timestamp::from_millis(0),
        };
        let line = describe(&contact, Timestamp::from_millis(30_000));
        assert_eq!(
            line,
            "Bob Jones: 3 messages (1 sms, 2 whatsapp) via sms+whatsapp, last just now"
        );
    }
}
