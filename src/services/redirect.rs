use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{LinkpadError, Result};
use crate::remote_log::packages;
use crate::repository::UrlRepository;
use crate::storage::DIRECT_SOURCE;

/// Where a resolved shortcode sends the visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectTarget {
    pub shortcode: String,
    pub original_url: String,
    pub click_count: usize,
}

pub struct RedirectService {
    repo: Arc<UrlRepository>,
}

impl RedirectService {
    pub fn new(repo: Arc<UrlRepository>) -> Self {
        Self { repo }
    }

    /// Resolve `code` at the current time and record the click.
    pub fn resolve_redirect(&self, code: &str, source: Option<&str>) -> Result<RedirectTarget> {
        self.resolve_redirect_at(code, source, Utc::now())
    }

    /// Resolve against an explicit clock reading.
    ///
    /// `source` defaults to `"direct"`. Expired links are reported as
    /// `Expired`, not swept.
    pub fn resolve_redirect_at(
        &self,
        code: &str,
        source: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RedirectTarget> {
        let logger = self.repo.logger();
        logger.info(
            packages::API,
            format!("Attempting redirect for shortcode: {}", code),
        );

        let record = match self.repo.resolve(code, now) {
            Ok(record) => record,
            Err(e @ LinkpadError::NotFound(_)) => {
                logger.error(packages::API, format!("Shortcode not found: {}", code));
                return Err(e);
            }
            Err(e @ LinkpadError::Expired(_)) => {
                logger.error(packages::API, format!("Expired URL accessed: {}", code));
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let source = source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DIRECT_SOURCE);
        let updated = self.repo.record_click(&record.shortcode, source)?;

        logger.info(
            packages::API,
            format!("Redirecting to: {}", updated.original_url),
        );

        Ok(RedirectTarget {
            click_count: updated.click_count(),
            shortcode: updated.shortcode,
            original_url: updated.original_url,
        })
    }
}
