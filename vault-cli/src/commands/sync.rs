//! Pull messages from a device and show stats.

use anyhow::Result;
use vault_client::Notice;
use vault_types::{DeviceId, MessagePlatform};

use super::{print_notice, print_stats, Session};

/// Run the sync command.
pub async fn run(session: &Session, device: &DeviceId, platforms: &[MessagePlatform]) -> Result<()> {
    let service = session.synced_messages(device, platforms).await?;
    let stats = service.stats();

    println!();
    print_stats(&stats);
    println!();
    print_notice(&Notice::sync_complete(stats.total_messages, device.as_str()));
    Ok(())
}
