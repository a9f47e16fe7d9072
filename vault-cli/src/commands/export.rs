//! Write a JSON backup file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vault_types::{DeviceId, Timestamp};

use super::{print_stats, Session};

/// Run the export command.
pub async fn run(session: &Session, device: &DeviceId, out: Option<&Path>) -> Result<()> {
    let path = export(session, device, out).await?;

    println!("Backup written to {}", path.display());
    Ok(())
}

/// Sync `device` and write its messages into `out` (or the data directory).
///
/// Returns the path of the written file.
pub async fn export(session: &Session, device: &DeviceId, out: Option<&Path>) -> Result<PathBuf> {
    let service = session.synced_messages(device, &[]).await?;
    let doc = service.export(Timestamp::now());

    println!();
    print_stats(&doc.stats);
    println!();

    let dir = out.unwrap_or(&session.data_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .context("Failed to create output directory")?;

    let path = dir.join(doc.file_name());
    let contents = doc.to_json().context("Failed to serialize backup")?;
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), messages = doc.messages.len(), "Backup exported");
    Ok(path)
}
