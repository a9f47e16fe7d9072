//! Scan from this device, optionally grant access, and read texts.
//!
//! Texts read from the chosen device are also pulled into message sync as
//! SMS so the totals reflect the mobile backup.

use anyhow::Result;
use vault_client::{ClientError, MessageSync, MobileDeviceScanner, Notice};
use vault_types::{DeviceId, MessagePlatform, MobileDevice};

use super::{print_notice, print_stats, Session};

/// Run the mobile command.
pub async fn run(session: &Session, device: &DeviceId, grant: bool) -> Result<()> {
    let host = session.config.backup.host_platform;
    let scanner = MobileDeviceScanner::new(session.backend(), host);

    println!("Scanning nearby devices from {}...", host);
    scanner.scan_for_devices().await;
    print_devices(&scanner.devices());
    println!();

    if grant {
        if scanner.request_permissions(device).await {
            let name = scanner
                .device(device)
                .map(|d| d.name)
                .unwrap_or_else(|| device.to_string());
            print_notice(&Notice::permissions_granted(&name));
        } else {
            print_notice(&Notice::permission_denied());
        }
    }

    let texts = match scanner.sync_messages(device).await {
        Ok(texts) => texts,
        Err(e) => {
            print_notice(&Notice::from_error(&e));
            return Err(e.into());
        }
    };
    let name = scanner
        .device(device)
        .map(|d| d.name)
        .unwrap_or_else(|| device.to_string());
    print_notice(&Notice::sync_complete(texts.len(), &name));

    let sync = MessageSync::new(session.backend());
    sync.sync_messages(device, &[MessagePlatform::Sms])
        .await
        .map_err(|e: ClientError| {
            print_notice(&Notice::from_error(&e));
            e
        })?;
    println!();
    print_stats(&sync.stats());
    Ok(())
}

fn print_devices(devices: &[MobileDevice]) {
    println!("Devices:");
    for device in devices {
        println!("  {}", describe(device));
    }
}

fn describe(device: &MobileDevice) -> String {
    let count = device
        .message_count
        .map(|n| format!(", {n} texts"))
        .unwrap_or_default();
    format!(
        "[{}] {} ({}, {}) {} - {}{}",
        device.id,
        device.name,
        device.kind,
        device.platform,
        device.status,
        device.permissions.level(),
        count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use tempfile::tempdir;
    use vault_types::{MobilePlatform, CURRENT_DEVICE_ID};

    #[tokio::test]
    async fn grant_then_sync_current_device() {
        let dir = tempdir().unwrap();
        let result = run(&session(dir.path()), &DeviceId::from(CURRENT_DEVICE_ID), true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn sync_without_grant_fails() {
        let dir = tempdir().unwrap();
        let err = run(&session(dir.path()), &DeviceId::from(CURRENT_DEVICE_ID), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("SMS permission not granted"));
    }

    #[tokio::test]
    async fn nearby_device_can_be_synced() {
        let dir = tempdir().unwrap();
        let result = run(
            &session(dir.path()),
            &DeviceId::from("bluetooth-device-1"),
            true,
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_device_fails() {
        let dir = tempdir().unwrap();
        let err = run(&session(dir.path()), &DeviceId::from("ghost"), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("device not found"));
    }

    #[test]
    fn describe_shows_permission_level() {
        let device = MobileDevice::current(MobilePlatform::Android);
        assert_eq!(
            describe(&device),
            "[current-device] My Android (current, android) connected - Permissions required"
        );
    }
}
