//! URL registry
//!
//! CRUD over the single JSON blob that holds every [`ShortenedUrlRecord`].
//! Each operation reads the blob, changes it in memory and writes it back.
//! Storage problems never escape this layer: a missing or corrupt blob reads
//! as empty and a failed write is logged and dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::StaticConfig;
use crate::errors::{LinkpadError, Result};
use crate::remote_log::{EventLogger, packages};
use crate::storage::{ClickRecord, KeyValueStore, ShortenedUrlRecord};
use crate::utils::{
    DEFAULT_CODE_LENGTH, generate_random_code, validate_shortcode, validate_url,
    validate_validity_minutes,
};

/// Request to shorten one URL
#[derive(Debug, Clone)]
pub struct CreateUrlRequest {
    pub original_url: String,
    /// Custom shortcode; a random one is generated when absent
    pub shortcode: Option<String>,
    /// Minutes until expiry; the configured default when absent
    pub validity_minutes: Option<i64>,
}

impl CreateUrlRequest {
    pub fn new<S: Into<String>>(original_url: S) -> Self {
        Self {
            original_url: original_url.into(),
            shortcode: None,
            validity_minutes: None,
        }
    }

    pub fn with_shortcode<S: Into<String>>(mut self, shortcode: S) -> Self {
        self.shortcode = Some(shortcode.into());
        self
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    pub storage_key: String,
    pub code_length: usize,
    pub default_validity_minutes: i64,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            storage_key: "shortenedUrls".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            default_validity_minutes: 30,
        }
    }
}

impl From<&StaticConfig> for RepositoryOptions {
    fn from(config: &StaticConfig) -> Self {
        Self {
            storage_key: config.storage.key.clone(),
            code_length: config.shortener.code_length,
            default_validity_minutes: config.shortener.default_validity_minutes,
        }
    }
}

pub struct UrlRepository {
    store: Arc<dyn KeyValueStore>,
    logger: EventLogger,
    options: RepositoryOptions,
}

impl UrlRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, logger: EventLogger) -> Self {
        Self::with_options(store, logger, RepositoryOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn KeyValueStore>,
        logger: EventLogger,
        options: RepositoryOptions,
    ) -> Self {
        Self {
            store,
            logger,
            options,
        }
    }

    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }

    pub fn options(&self) -> &RepositoryOptions {
        &self.options
    }

    /// Every stored record in insertion order.
    ///
    /// Absent, unreadable or corrupt data reads as an empty list.
    pub fn load(&self) -> Vec<ShortenedUrlRecord> {
        let raw = match self.store.get_item(&self.options.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                self.logger.error(
                    packages::UTILS,
                    format!("Failed to retrieve stored URLs: {}", e.message()),
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ShortenedUrlRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                self.logger.error(
                    packages::UTILS,
                    format!("Failed to retrieve stored URLs: {}", e),
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection.
    ///
    /// Returns whether the write went through; failures (quota, I/O) are
    /// only logged.
    pub fn save(&self, records: &[ShortenedUrlRecord]) -> bool {
        let result = serde_json::to_string(records)
            .map_err(LinkpadError::from)
            .and_then(|json| self.store.set_item(&self.options.storage_key, &json));

        match result {
            Ok(()) => {
                self.logger.info(packages::STATE, "URLs saved to storage");
                true
            }
            Err(e) => {
                self.logger.error(
                    packages::STATE,
                    format!("Failed to save URLs to storage: {}", e.message()),
                );
                false
            }
        }
    }

    pub fn list(&self) -> Vec<ShortenedUrlRecord> {
        self.load()
    }

    /// The last `n` records created, newest first
    pub fn recent(&self, n: usize) -> Vec<ShortenedUrlRecord> {
        self.load().into_iter().rev().take(n).collect()
    }

    /// Validate, assign a shortcode and persist a new record.
    ///
    /// A generated code is drawn once; if it happens to collide with an
    /// existing record the call fails with `DuplicateShortcode` like a
    /// custom code would.
    pub fn create(&self, request: CreateUrlRequest) -> Result<ShortenedUrlRecord> {
        let original_url = request.original_url.trim();
        validate_url(original_url)?;

        let shortcode = match request.shortcode.filter(|c| !c.is_empty()) {
            Some(code) => {
                validate_shortcode(&code)?;
                code
            }
            None => generate_random_code(self.options.code_length),
        };

        let validity_minutes = validate_validity_minutes(
            request
                .validity_minutes
                .unwrap_or(self.options.default_validity_minutes),
        )?;

        let mut records = self.load();
        if records.iter().any(|r| r.shortcode == shortcode) {
            return Err(LinkpadError::duplicate_shortcode(format!(
                "Shortcode '{}' already exists",
                shortcode
            )));
        }

        let now = Utc::now();
        let record = ShortenedUrlRecord::new(
            next_id(&records, now),
            original_url.to_string(),
            shortcode,
            now,
            validity_minutes,
        );

        records.push(record.clone());
        self.save(&records);
        self.logger.info(
            packages::API,
            format!("New URL shortened: {}", record.shortcode),
        );

        Ok(record)
    }

    /// Linear scan; expired records are still returned.
    pub fn find_by_shortcode(&self, code: &str) -> Option<ShortenedUrlRecord> {
        self.load().into_iter().find(|r| r.shortcode == code)
    }

    /// Look a shortcode up for redirection.
    ///
    /// Fails with `NotFound` for unknown codes and `Expired` once the
    /// validity window has closed.
    pub fn resolve(&self, code: &str, now: DateTime<Utc>) -> Result<ShortenedUrlRecord> {
        let record = self
            .find_by_shortcode(code)
            .ok_or_else(|| LinkpadError::not_found(format!("URL not found: {}", code)))?;

        if record.is_expired(now) {
            return Err(LinkpadError::expired(format!(
                "This URL has expired: {}",
                code
            )));
        }
        Ok(record)
    }

    /// Append a click and return the updated record.
    ///
    /// An unknown shortcode leaves storage untouched.
    pub fn record_click(&self, code: &str, source: &str) -> Result<ShortenedUrlRecord> {
        let mut records = self.load();
        let Some(index) = records.iter().position(|r| r.shortcode == code) else {
            self.logger.error(
                packages::API,
                format!("Click recorded for non-existent shortcode: {}", code),
            );
            return Err(LinkpadError::not_found(format!("URL not found: {}", code)));
        };

        records[index]
            .clicks
            .push(ClickRecord::new(Utc::now(), source));
        self.save(&records);
        self.logger.info(
            packages::API,
            format!("Click recorded for shortcode: {}", code),
        );

        Ok(records.swap_remove(index))
    }

    /// Drop every record whose `expires_at` is at or before `now`.
    ///
    /// Survivors keep their order and are returned. Storage is only
    /// rewritten when something was removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Vec<ShortenedUrlRecord> {
        let records = self.load();
        let before = records.len();
        let valid: Vec<ShortenedUrlRecord> =
            records.into_iter().filter(|r| !r.is_expired(now)).collect();

        if valid.len() != before {
            self.save(&valid);
            self.logger.info(
                packages::UTILS,
                format!("Expired URLs cleaned up ({} removed)", before - valid.len()),
            );
        }
        valid
    }
}

/// Creation time in epoch milliseconds, bumped past the newest stored id.
fn next_id(records: &[ShortenedUrlRecord], now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis();
    let newest = records.iter().filter_map(|r| r.id.parse::<i64>().ok()).max();
    match newest {
        Some(newest) if newest >= candidate => (newest + 1).to_string(),
        _ => candidate.to_string(),
    }
}
