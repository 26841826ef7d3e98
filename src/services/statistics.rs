use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use strum::AsRefStr;

use crate::errors::{LinkpadError, Result};
use crate::remote_log::packages;
use crate::repository::UrlRepository;
use crate::storage::{ClickRecord, ShortenedUrlRecord};

/// Links with less time left than this are flagged as expiring soon
pub const EXPIRING_SOON_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LinkStatus {
    Active,
    ExpiringSoon,
    Expired,
}

pub fn link_status(record: &ShortenedUrlRecord, now: DateTime<Utc>) -> LinkStatus {
    if record.is_expired(now) {
        LinkStatus::Expired
    } else if record.time_left(now) < Duration::minutes(EXPIRING_SOON_MINUTES) {
        LinkStatus::ExpiringSoon
    } else {
        LinkStatus::Active
    }
}

/// "Expired" or "Expires in N day(s)/hour(s)/minute(s)", largest whole unit
pub fn status_text(record: &ShortenedUrlRecord, now: DateTime<Utc>) -> String {
    if record.is_expired(now) {
        return "Expired".to_string();
    }

    let left = record.time_left(now);
    let (days, hours, minutes) = (left.num_days(), left.num_hours(), left.num_minutes());
    if days > 0 {
        format!("Expires in {} day(s)", days)
    } else if hours > 0 {
        format!("Expires in {} hour(s)", hours)
    } else {
        format!("Expires in {} minute(s)", minutes)
    }
}

pub fn short_url(base_url: &str, shortcode: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), shortcode)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub id: String,
    pub shortcode: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: LinkStatus,
    pub status_text: String,
    pub click_count: usize,
    pub clicks: Vec<ClickRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub generated_at: DateTime<Utc>,
    pub total_links: usize,
    pub total_clicks: usize,
    pub links: Vec<LinkStats>,
}

pub struct StatisticsService {
    repo: Arc<UrlRepository>,
    base_url: String,
}

impl StatisticsService {
    pub fn new<S: Into<String>>(repo: Arc<UrlRepository>, base_url: S) -> Self {
        Self {
            repo,
            base_url: base_url.into(),
        }
    }

    fn to_stats(&self, record: ShortenedUrlRecord, now: DateTime<Utc>) -> LinkStats {
        LinkStats {
            status: link_status(&record, now),
            status_text: status_text(&record, now),
            short_url: short_url(&self.base_url, &record.shortcode),
            click_count: record.click_count(),
            id: record.id,
            shortcode: record.shortcode,
            original_url: record.original_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            clicks: record.clicks,
        }
    }

    /// Sweep expired links, then summarise what is left
    pub fn report(&self, now: DateTime<Utc>) -> StatisticsReport {
        let records = self.repo.purge_expired(now);
        let total_clicks = records.iter().map(ShortenedUrlRecord::click_count).sum();
        let links: Vec<LinkStats> = records
            .into_iter()
            .map(|record| self.to_stats(record, now))
            .collect();

        self.repo
            .logger()
            .info(packages::HANDLER, format!("Statistics generated for {} URL(s)", links.len()));

        StatisticsReport {
            generated_at: now,
            total_links: links.len(),
            total_clicks,
            links,
        }
    }

    /// Details and click history of one link, after the sweep
    pub fn inspect(&self, code: &str, now: DateTime<Utc>) -> Result<LinkStats> {
        self.repo
            .purge_expired(now)
            .into_iter()
            .find(|r| r.shortcode == code)
            .map(|record| {
                self.repo
                    .logger()
                    .info(packages::STATE, format!("Expanded details for URL: {}", record.id));
                self.to_stats(record, now)
            })
            .ok_or_else(|| LinkpadError::not_found(format!("URL not found: {}", code)))
    }
}
