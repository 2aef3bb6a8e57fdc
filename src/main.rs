//! waylog: a keyboard-driven terminal journal for logging workouts on a map.
//!
//! Move the cursor, press Enter to pick a spot, fill in the form, and the
//! workout appears as a map marker and a list entry, persisted locally.

mod app;
mod cli;
mod core;
mod data;
mod ui;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cli::{AppConfig, Cli, Commands};
use crate::core::persist::PersistenceAdapter;
use data::SqliteStore;

fn main() -> Result<()> {
    // Keep logs on stderr so they don't fight the TUI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Open {
            lat,
            lng,
            zoom,
            db_path,
        } => {
            let config = AppConfig::from_open_command(lat, lng, zoom, db_path);
            app::run(config)?;
        }
        Commands::Reset { db_path } => {
            let path = db_path.unwrap_or_else(SqliteStore::default_path);
            let kv = SqliteStore::open(&path)?;
            let mut persistence = PersistenceAdapter::new(kv);
            persistence.clear();
            println!("Cleared journal snapshot at {}", path.display());
        }
    }

    Ok(())
}
