//! Scan, then sync one device.

use anyhow::Result;
use vault_client::{DeviceScanner, Notice};
use vault_types::{DeviceId, DeviceStatus, ScanResult};

use super::scan::{print_devices, scan_and_list};
use super::{print_notice, Session};

/// Run the sync-device command.
///
/// An id the scan did not find prints a notice and still succeeds.
pub async fn run(session: &Session, id: &DeviceId) -> Result<()> {
    let scanner = DeviceScanner::new(session.backend());
    scan_and_list(&scanner).await?;
    println!();

    let Some(device) = scanner.snapshot().device(id).cloned() else {
        print_notice(&Notice::device_not_found(id.as_str()));
        return Ok(());
    };

    let _progress = scanner.subscribe({
        let id = id.clone();
        move |snapshot: &ScanResult| {
            if let Some(d) = snapshot.device(&id) {
                if d.status == DeviceStatus::Syncing {
                    println!("Syncing {}...", d.name);
                }
            }
        }
    });

    let before = device.message_count.unwrap_or(0);
    if let Err(e) = scanner.sync_device(id).await {
        print_notice(&Notice::sync_failed());
        return Err(e.into());
    }

    if let Some(after) = scanner.snapshot().device(id) {
        let gained = after.message_count.unwrap_or(0).saturating_sub(before);
        println!();
        print_devices(std::slice::from_ref(after));
        println!();
        print_notice(&Notice::sync_complete(gained as usize, &after.name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use tempfile::tempdir;

    #[tokio::test]
    async fn sync_known_device() {
        let dir = tempdir().unwrap();
        let result = run(&session(dir.path()), &DeviceId::from("1")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_device_still_succeeds() {
        let dir = tempdir().unwrap();
        let result = run(&session(dir.path()), &DeviceId::from("missing")).await;
        assert!(result.is_ok());
    }
}
