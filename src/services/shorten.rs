//! Batch shortening
//!
//! Takes the raw text of up to `max_batch` form entries, validates every
//! field first and only then creates records. A field error anywhere rejects
//! the whole batch; a per-entry failure during creation (duplicate code)
//! only affects that entry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::{LinkpadError, Result};
use crate::remote_log::packages;
use crate::repository::{CreateUrlRequest, UrlRepository};
use crate::storage::ShortenedUrlRecord;
use crate::utils::{
    InputField, ValidationError, parse_validity_minutes, validate_shortcode, validate_url,
};

/// Size of the "Recently Shortened URLs" panel
pub const RECENT_LINKS: usize = 5;

/// One row of the shortening form, as typed
#[derive(Debug, Clone, Default)]
pub struct UrlEntry {
    pub original_url: String,
    /// Blank means the configured default
    pub validity_minutes: String,
    /// Blank means generate one
    pub custom_shortcode: String,
}

impl UrlEntry {
    pub fn new<S: Into<String>>(original_url: S) -> Self {
        Self {
            original_url: original_url.into(),
            ..Default::default()
        }
    }

    pub fn with_validity<S: Into<String>>(mut self, minutes: S) -> Self {
        self.validity_minutes = minutes.into();
        self
    }

    pub fn with_shortcode<S: Into<String>>(mut self, code: S) -> Self {
        self.custom_shortcode = code.into();
        self
    }

    fn is_blank(&self) -> bool {
        self.original_url.trim().is_empty()
    }
}

/// Errors attached to one entry, one slot per input plus a general one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_shortcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_minutes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.original_url.is_none()
            && self.custom_shortcode.is_none()
            && self.validity_minutes.is_none()
            && self.general.is_none()
    }

    pub fn set(&mut self, error: ValidationError) {
        let slot = match error.field {
            InputField::OriginalUrl => &mut self.original_url,
            InputField::CustomShortcode => &mut self.custom_shortcode,
            InputField::ValidityMinutes => &mut self.validity_minutes,
        };
        *slot = Some(error.message);
    }

    pub fn general<S: Into<String>>(message: S) -> Self {
        Self {
            general: Some(message.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryError {
    pub index: usize,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub created: Vec<ShortenedUrlRecord>,
    pub errors: Vec<EntryError>,
    /// Set when field validation stopped the batch before anything was created
    pub rejected: bool,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        !self.rejected && self.errors.is_empty()
    }
}

pub struct ShortenService {
    repo: Arc<UrlRepository>,
    max_batch: usize,
}

impl ShortenService {
    pub fn new(repo: Arc<UrlRepository>, max_batch: usize) -> Self {
        Self { repo, max_batch }
    }

    /// Field-level checks for every non-blank entry
    pub fn validate_inputs(&self, entries: &[UrlEntry]) -> Vec<EntryError> {
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_blank())
            .filter_map(|(index, entry)| {
                let mut errors = FieldErrors::default();
                if let Err(e) = validate_url(&entry.original_url) {
                    errors.set(e);
                }
                let code = entry.custom_shortcode.trim();
                if !code.is_empty()
                    && let Err(e) = validate_shortcode(code)
                {
                    errors.set(e);
                }
                if let Err(e) = parse_validity_minutes(&entry.validity_minutes) {
                    errors.set(e);
                }
                (!errors.is_empty()).then_some(EntryError { index, errors })
            })
            .collect()
    }

    pub fn shorten_batch(&self, entries: &[UrlEntry]) -> Result<BatchOutcome> {
        let logger = self.repo.logger();

        if entries.len() > self.max_batch {
            return Err(LinkpadError::Validation(ValidationError::new(
                InputField::OriginalUrl,
                format!("At most {} URLs can be shortened at once", self.max_batch),
            )));
        }

        let field_errors = self.validate_inputs(entries);
        if !field_errors.is_empty() {
            logger.error(
                packages::API,
                "URL shortening failed due to validation errors",
            );
            return Ok(BatchOutcome {
                created: Vec::new(),
                errors: field_errors,
                rejected: true,
            });
        }

        let mut outcome = BatchOutcome::default();
        for (index, entry) in entries.iter().enumerate() {
            if entry.is_blank() {
                continue;
            }

            let code = entry.custom_shortcode.trim();
            let request = CreateUrlRequest {
                original_url: entry.original_url.clone(),
                shortcode: (!code.is_empty()).then(|| code.to_string()),
                validity_minutes: parse_validity_minutes(&entry.validity_minutes)?,
            };

            match self.repo.create(request) {
                Ok(record) => {
                    logger.info(
                        packages::API,
                        format!("Successfully shortened URL {}", index + 1),
                    );
                    outcome.created.push(record);
                }
                Err(e) => {
                    logger.error(
                        packages::API,
                        format!("Failed to shorten URL {}: {}", index + 1, e.message()),
                    );
                    outcome.errors.push(EntryError {
                        index,
                        errors: FieldErrors::general(e.message()),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Sweep expired records, then return the `n` newest survivors
    pub fn recent(&self, now: DateTime<Utc>, n: usize) -> Vec<ShortenedUrlRecord> {
        let survivors = self.repo.purge_expired(now);
        survivors.into_iter().rev().take(n).collect()
    }
}
