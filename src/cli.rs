//! Command-line interface argument parsing for waylog.
//!
//! - `waylog open --lat 48.85 --lng 2.35`
//! - `waylog open --db-path ./journal.db --zoom 11`
//! - `waylog reset`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::session::DEFAULT_ZOOM;

/// A keyboard-driven terminal journal for logging workouts on a map.
#[derive(Parser, Debug)]
#[command(name = "waylog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the journal TUI
    Open {
        /// Latitude of your current position (stands in for a location fix)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of your current position
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Initial map zoom level
        #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
        zoom: u8,

        /// Path to the journal database
        /// Defaults to <platform data dir>/waylog/journal.db
        #[arg(long)]
        db_path: Option<PathBuf>,
    },

    /// Delete the persisted journal snapshot
    Reset {
        /// Path to the journal database
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Current position, if the user supplied both halves of one
    pub position: Option<(f64, f64)>,
    pub zoom: u8,
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from the `open` command's arguments
    pub fn from_open_command(
        lat: Option<f64>,
        lng: Option<f64>,
        zoom: u8,
        db_path: Option<PathBuf>,
    ) -> Self {
        let position = match (lat, lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        };

        AppConfig {
            position,
            zoom,
            db_path: db_path.unwrap_or_else(crate::data::SqliteStore::default_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::from_open_command(None, None, DEFAULT_ZOOM, None);
        assert_eq!(config.position, None);
        assert_eq!(config.zoom, DEFAULT_ZOOM);
        assert!(config.db_path.ends_with("journal.db"));
    }

    #[test]
    fn test_position_requires_both_halves() {
        let config = AppConfig::from_open_command(Some(48.85), None, DEFAULT_ZOOM, None);
        assert_eq!(config.position, None);

        let config = AppConfig::from_open_command(Some(48.85), Some(2.35), DEFAULT_ZOOM, None);
        assert_eq!(config.position, Some((48.85, 2.35)));
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = AppConfig::from_open_command(
            None,
            None,
            DEFAULT_ZOOM,
            Some(PathBuf::from("/tmp/j.db")),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/j.db"));
    }
}
