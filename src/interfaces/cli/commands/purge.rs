//! Purge expired links command

use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::repository::UrlRepository;

pub fn purge_links(repo: Arc<UrlRepository>) -> Result<(), CliError> {
    let before = repo.load().len();
    let remaining = repo.purge_expired(Utc::now()).len();
    let removed = before.saturating_sub(remaining);

    if removed == 0 {
        println!("{} No expired links", "ℹ".bold().blue());
    } else {
        println!(
            "{} Removed {} expired link(s), {} remaining",
            "✓".bold().green(),
            removed.to_string().yellow(),
            remaining.to_string().green()
        );
    }
    Ok(())
}
