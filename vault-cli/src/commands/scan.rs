//! Discover phones available for syncing.

use anyhow::Result;
use vault_client::{DeviceScanner, MockBackend, Notice};
use vault_types::{Device, Timestamp};

use super::{format_age, print_notice, Session};

/// Run the scan command.
pub async fn run(session: &Session) -> Result<()> {
    let scanner = DeviceScanner::new(session.backend());
    scan_and_list(&scanner).await
}

/// Scan with `scanner` and print what was found.
pub async fn scan_and_list(scanner: &DeviceScanner<MockBackend>) -> Result<()> {
    let _progress = scanner.subscribe(|snapshot| {
        if snapshot.scanning {
            println!("Scanning for devices...");
        }
    });

    if let Err(e) = scanner.start_scan().await {
        print_notice(&Notice::scan_failed());
        return Err(e.into());
    }

    let devices = scanner.devices();
    println!();
    print_devices(&devices);
    println!();
    print_notice(&Notice::scan_complete(devices.len()));
    Ok(())
}

/// Print one line per device.
pub fn print_devices(devices: &[Device]) {
    let now = Timestamp::now();
    println!("Devices:");
    for device in devices {
        println!("  {}", describe(device, now));
    }
}

fn describe(device: &Device, now: Timestamp) -> String {
    let synced = device
        .last_sync
        .map(|ts| format_age(ts, now))
        .unwrap_or_else(|| "never".to_string());
    let count = device
        .message_count
        .map(|n| format!("{n} messages"))
        .unwrap_or_else(|| "no messages".to_string());
    format!(
        "[{}] {} ({}) {} - {}, synced {}",
        device.id,
        device.name,
        device.platform.as_str(),
        device.status.as_str(),
        count,
        synced
    )
}
