use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Location recorded for every click; no geolocation is wired in.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Source recorded when the caller does not know where a click came from
pub const DIRECT_SOURCE: &str = "direct";

/// One resolution of a shortcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub location: String,
}

impl ClickRecord {
    pub fn new<S: Into<String>>(timestamp: DateTime<Utc>, source: S) -> Self {
        Self {
            timestamp,
            source: source.into(),
            location: UNKNOWN_LOCATION.to_string(),
        }
    }
}

/// A shortened URL as persisted in the store.
///
/// Field names are camelCase on the wire so blobs written by the browser
/// build of the shortener load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenedUrlRecord {
    pub id: String,
    pub original_url: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub clicks: Vec<ClickRecord>,
    #[serde(default = "default_is_valid")]
    pub is_valid: bool,
}

fn default_is_valid() -> bool {
    true
}

impl ShortenedUrlRecord {
    pub fn new(
        id: String,
        original_url: String,
        shortcode: String,
        created_at: DateTime<Utc>,
        validity_minutes: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            shortcode,
            created_at,
            expires_at: created_at + Duration::minutes(validity_minutes),
            clicks: Vec::new(),
            is_valid: true,
        }
    }

    /// 到期时间不晚于 `now` 即视为过期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    pub fn time_left(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at - now
    }
}
