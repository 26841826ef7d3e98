//! Open (resolve) link command

use std::sync::Arc;

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::repository::UrlRepository;
use crate::services::RedirectService;

/// Resolve `code`, record the click and print the target on stdout
pub fn open_link(
    repo: Arc<UrlRepository>,
    code: &str,
    source: Option<&str>,
) -> Result<(), CliError> {
    let target = RedirectService::new(repo).resolve_redirect(code, source)?;

    eprintln!(
        "{} {} -> {} (clicks: {})",
        "→".bold().green(),
        target.shortcode.cyan(),
        target.original_url.blue().underline(),
        target.click_count
    );
    println!("{}", target.original_url);
    Ok(())
}
