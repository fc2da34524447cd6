//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for channelizer using clap's derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Channelizer - attributes web-tracking events to marketing channels
#[derive(Parser)]
#[command(name = "channelizer")]
#[command(version)]
#[command(about = "Fetch tracking logs, classify marketing channels and load them into a database", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch logs, classify channels and fully refresh the database
    Run {
        /// First day to fetch (YYYY-MM-DD), overrides api.from_date
        #[arg(long)]
        from_date: Option<String>,

        /// Last day to fetch (YYYY-MM-DD), overrides api.to_date
        #[arg(long)]
        to_date: Option<String>,
    },

    /// Print pageview counts per channel from the aggregation view
    Report {
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Write csv/json output to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Classify a single location URL without touching the API or database
    ///
    /// Usage: classify <LOCATION> [--referrer DOMAIN]
    Classify {
        /// Location URL of the tracking event
        location: String,

        /// Referrer domain of the tracking event
        #[arg(long, short = 'r')]
        referrer: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml, `-` for stdout)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
}
