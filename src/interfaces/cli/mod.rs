//! CLI interface module
//!
//! Builds the registry from configuration and dispatches parsed commands.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::LinkpadError;
use crate::remote_log::EventLogger;
use crate::repository::{RepositoryOptions, UrlRepository};
use crate::storage::StorageFactory;
use commands::{config_generate, open_link, purge_links, shorten_urls, show_stats};

#[derive(Debug)]
pub enum CliError {
    Linkpad(LinkpadError),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Linkpad(err) => err.format_simple(),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Linkpad(err) => err.format_colored(),
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LinkpadError> for CliError {
    fn from(err: LinkpadError) -> Self {
        CliError::Linkpad(err)
    }
}

/// Build the registry described by `config`
pub fn build_repository(
    config: &StaticConfig,
    logger: EventLogger,
) -> Result<Arc<UrlRepository>, CliError> {
    let store = StorageFactory::create(&config.storage)?;
    Ok(Arc::new(UrlRepository::with_options(
        store,
        logger,
        RepositoryOptions::from(config),
    )))
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(
    cmd: Commands,
    config: Arc<StaticConfig>,
    logger: EventLogger,
) -> Result<(), CliError> {
    // Generate doesn't touch storage, handle it separately
    if let Commands::Config { action } = cmd {
        return match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force)
            }
        };
    }

    let repo = build_repository(&config, logger)?;

    match cmd {
        Commands::Shorten {
            urls,
            validity,
            codes,
            json,
        } => shorten_urls(repo, &config, urls, validity, codes, json),
        Commands::Stats { code, json } => show_stats(repo, &config, code, json),
        Commands::Open { code, source } => open_link(repo, &code, source.as_deref()),
        Commands::Purge => purge_links(repo),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
