//! Command-line interface definitions using clap
//!
//! Each subcommand stands in for one screen of the shortener: `shorten`
//! (create), `stats` (statistics) and `open` (resolve a shortcode).

use clap::{Parser, Subcommand};

/// linkpad - a small local URL shortener
#[derive(Parser)]
#[command(name = "linkpad")]
#[command(version)]
#[command(about = "A small local URL shortener", long_about = None)]
pub struct Cli {
    /// Configuration file (default: linkpad.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Shorten one or more URLs
    ///
    /// The n-th --code applies to the n-th URL; URLs without one get a
    /// random 6-character code.
    Shorten {
        /// URLs to shorten
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,

        /// Validity in minutes for every URL in this batch (default: 30)
        #[arg(long)]
        validity: Option<String>,

        /// Custom shortcode, repeatable
        #[arg(long = "code")]
        codes: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show click statistics for all links or for one shortcode
    Stats {
        /// Shortcode to inspect
        code: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a shortcode, record the click and print the target URL
    Open {
        /// Shortcode to resolve
        code: String,

        /// Where the click came from (default: direct)
        #[arg(long)]
        source: Option<String>,
    },

    /// Remove every expired link
    Purge,

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
        /// Output path (default: linkpad.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
