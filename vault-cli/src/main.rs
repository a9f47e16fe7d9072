//! # msgvault
//!
//! Back up SMS and WhatsApp messages from nearby phones.
//!
//! ## Commands
//!
//! - `scan`: Discover phones available for syncing
//! - `sync-device`: Sync one discovered phone
//! - `sync`: Pull messages from a device and show stats
//! - `messages`: List synced messages, newest first
//! - `contacts`: Summarize synced messages per contact
//! - `mobile`: Scan from this device, grant access and read texts
//! - `export`: Write a JSON backup file
//!
//! ## Example
//!
//! ```bash
//! # Find devices
//! msgvault scan
//!
//! # Pull SMS only from device 1
//! msgvault sync --device 1 --platform sms
//!
//! # Search messages
//! msgvault messages --device 1 --search lunch --limit 10
//!
//! # Read texts from this phone after granting access
//! msgvault mobile --grant
//!
//! # Skip simulated delays
//! msgvault --no-delay export --device 1 --out ./backups
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vault_types::{DeviceId, MessagePlatform, CURRENT_DEVICE_ID};

mod commands;
mod config;

use commands::{contacts, export, messages, mobile, scan, sync, sync_device, Session};
use config::{Config, CONFIG_FILE};

/// Back up SMS and WhatsApp messages from nearby phones.
#[derive(Parser, Debug)]
#[command(name = "msgvault")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for config and exports
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: msgvault.toml in the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip simulated device delays
    #[arg(long, global = true)]
    no_delay: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover phones available for syncing
    Scan,

    /// Scan, then sync one device
    SyncDevice {
        /// Device id as shown by `scan`
        id: String,
    },

    /// Pull messages from a device and show stats
    Sync {
        /// Device to pull from
        #[arg(long)]
        device: String,

        /// Platform to pull (repeatable; default from config)
        #[arg(long = "platform")]
        platforms: Vec<MessagePlatform>,
    },

    /// Pull messages, then list them newest first
    Messages {
        /// Device to pull from
        #[arg(long)]
        device: String,

        /// Only show messages whose contact or body contains this text
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of messages to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Pull messages, then summarize them per contact
    Contacts {
        /// Device to pull from
        #[arg(long)]
        device: String,
    },

    /// Scan from this device, optionally grant access, and read texts
    Mobile {
        /// Grant SMS, contacts and storage access before syncing
        #[arg(long)]
        grant: bool,

        /// Device to read texts from
        #[arg(long, default_value = CURRENT_DEVICE_ID)]
        device: String,
    },

    /// Pull messages, then write a JSON backup file
    Export {
        /// Device to pull from
        #[arg(long)]
        device: String,

        /// Output directory (default: the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Determine data directory
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir)
        .await
        .context("Failed to create data directory")?;

    let config_path = cli
        .config
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let config = Config::load_or_default(&config_path)?;
    tracing::debug!(?config, "Configuration loaded");

    let session = Session::new(config, data_dir, cli.no_delay);

    match cli.command {
        Commands::Scan => {
            scan::run(&session).await?;
        }
        Commands::SyncDevice { id } => {
            sync_device::run(&session, &DeviceId::from(id)).await?;
        }
        Commands::Sync { device, platforms } => {
            sync::run(&session, &DeviceId::from(device), &platforms).await?;
        }
        Commands::Messages {
            device,
            search,
            limit,
        } => {
            messages::run(&session, &DeviceId::from(device), search.as_deref(), limit).await?;
        }
        Commands::Contacts { device } => {
            contacts::run(&session, &DeviceId::from(device)).await?;
        }
        Commands::Mobile { grant, device } => {
            mobile::run(&session, &DeviceId::from(device), grant).await?;
        }
        Commands::Export { device, out } => {
            export::run(&session, &DeviceId::from(device), out.as_deref()).await?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` is honoured unless `-v` is given.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Get the default data directory for msgvault.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "msgvault", "msgvault")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
