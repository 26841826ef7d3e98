//! Statistics command

use std::sync::Arc;

use chrono::Utc;
use colored::{ColoredString, Colorize};

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::repository::UrlRepository;
use crate::services::{LinkStats, LinkStatus, StatisticsService};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::CommandError(e.to_string()))
}

fn colored_status(stats: &LinkStats) -> ColoredString {
    match stats.status {
        LinkStatus::Active => stats.status_text.green(),
        LinkStatus::ExpiringSoon => stats.status_text.yellow(),
        LinkStatus::Expired => stats.status_text.red(),
    }
}

fn print_summary_line(stats: &LinkStats) {
    println!(
        "  {} -> {} {} {}",
        stats.short_url.cyan(),
        stats.original_url.blue().underline(),
        format!("(clicks: {})", stats.click_count).dimmed().cyan(),
        colored_status(stats)
    );
}

fn print_details(stats: &LinkStats) {
    print_summary_line(stats);
    println!(
        "    {} {}",
        "Created:".dimmed(),
        stats.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "    {} {}",
        "Expires:".dimmed(),
        stats.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if stats.clicks.is_empty() {
        println!("    {}", "No clicks recorded yet".dimmed());
        return;
    }
    println!("    {}", "Clicks:".bold());
    for click in &stats.clicks {
        println!(
            "      {}  {}  {}",
            click.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            click.source.cyan(),
            click.location.dimmed()
        );
    }
}

pub fn show_stats(
    repo: Arc<UrlRepository>,
    config: &StaticConfig,
    code: Option<String>,
    as_json: bool,
) -> Result<(), CliError> {
    let service = StatisticsService::new(repo, config.shortener.base_url.clone());
    let now = Utc::now();

    if let Some(code) = code {
        let stats = service.inspect(&code, now)?;
        if as_json {
            println!("{}", to_json(&stats)?);
        } else {
            print_details(&stats);
        }
        return Ok(());
    }

    let report = service.report(now);
    if as_json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    if report.links.is_empty() {
        println!(
            "{} No shortened URLs found. Create some URLs first to see statistics.",
            "ℹ".bold().blue()
        );
        return Ok(());
    }

    println!("{}", "URL statistics:".bold().green());
    println!();
    for stats in &report.links {
        print_summary_line(stats);
    }
    println!();
    println!(
        "{} Total {} link(s), {} click(s)",
        "ℹ".bold().blue(),
        report.total_links.to_string().green(),
        report.total_clicks.to_string().green()
    );
    Ok(())
}
