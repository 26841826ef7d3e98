//! Shorten URLs command

use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;
use serde_json::json;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::repository::UrlRepository;
use crate::services::statistics::short_url;
use crate::services::{EntryError, RECENT_LINKS, ShortenService, UrlEntry};
use crate::storage::ShortenedUrlRecord;

/// Pair each URL with the shared validity and its positional `--code`
pub fn build_entries(
    urls: Vec<String>,
    validity: Option<String>,
    codes: Vec<String>,
) -> Result<Vec<UrlEntry>, CliError> {
    if codes.len() > urls.len() {
        return Err(CliError::ParseError(format!(
            "{} --code value(s) given for {} URL(s)",
            codes.len(),
            urls.len()
        )));
    }

    let validity = validity.unwrap_or_default();
    let mut codes = codes.into_iter();
    Ok(urls
        .into_iter()
        .map(|url| {
            UrlEntry::new(url)
                .with_validity(validity.clone())
                .with_shortcode(codes.next().unwrap_or_default())
        })
        .collect())
}

fn print_entry_error(entry: &EntryError) {
    let errors = &entry.errors;
    let messages = [
        ("originalUrl", &errors.original_url),
        ("customShortcode", &errors.custom_shortcode),
        ("validityMinutes", &errors.validity_minutes),
        ("error", &errors.general),
    ];
    for (field, message) in messages {
        if let Some(message) = message {
            println!(
                "{} URL {} {}: {}",
                "✗".bold().red(),
                (entry.index + 1).to_string().yellow(),
                field.dimmed(),
                message.red()
            );
        }
    }
}

fn print_recent(base_url: &str, recent: &[ShortenedUrlRecord]) {
    println!();
    println!("{}", "Recently Shortened URLs".bold().green());
    if recent.is_empty() {
        println!("  {}", "No active links".dimmed());
        return;
    }
    for record in recent {
        println!(
            "  {} -> {} {}",
            short_url(base_url, &record.shortcode).cyan(),
            record.original_url.blue(),
            format!("(clicks: {})", record.click_count()).dimmed()
        );
    }
}

pub fn shorten_urls(
    repo: Arc<UrlRepository>,
    config: &StaticConfig,
    urls: Vec<String>,
    validity: Option<String>,
    codes: Vec<String>,
    as_json: bool,
) -> Result<(), CliError> {
    let entries = build_entries(urls, validity, codes)?;
    let service = ShortenService::new(repo, config.shortener.max_batch);
    let outcome = service.shorten_batch(&entries)?;
    // 展示最近链接前先清理过期记录
    let recent = service.recent(Utc::now(), RECENT_LINKS);

    if as_json {
        let body = json!({
            "created": outcome.created,
            "errors": outcome.errors,
            "recent": recent,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| CliError::CommandError(e.to_string()))?
        );
    } else {
        for record in &outcome.created {
            println!(
                "{} {} -> {} (expires: {})",
                "✓".bold().green(),
                short_url(&config.shortener.base_url, &record.shortcode).cyan(),
                record.original_url.blue().underline(),
                record
                    .expires_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .yellow()
            );
        }
        for entry in &outcome.errors {
            print_entry_error(entry);
        }
        print_recent(&config.shortener.base_url, &recent);
    }

    if outcome.rejected {
        return Err(CliError::CommandError(
            "No URLs shortened: fix the fields above and retry".to_string(),
        ));
    }
    if !outcome.errors.is_empty() {
        return Err(CliError::CommandError(format!(
            "{} of {} URL(s) could not be shortened",
            outcome.errors.len(),
            outcome.errors.len() + outcome.created.len()
        )));
    }
    Ok(())
}
