//! 输入验证模块
//!
//! URL, shortcode and validity-window checks shared by the registry and the
//! shortening form. Every failure names the form field it belongs to so the
//! caller can show it next to that input.

use serde::Serialize;
use strum::AsRefStr;
use url::Url;

pub const SHORTCODE_MIN_LEN: usize = 3;
pub const SHORTCODE_MAX_LEN: usize = 10;

/// 有效期上限：100 年
pub const MAX_VALIDITY_MINUTES: i64 = 100 * 365 * 24 * 60;

/// Form field a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum InputField {
    OriginalUrl,
    CustomShortcode,
    ValidityMinutes,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 字段级验证错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: InputField,
    pub message: String,
}

impl ValidationError {
    pub fn new<T: Into<String>>(field: InputField, message: T) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_url() -> Self {
        Self::new(InputField::OriginalUrl, "Please enter a valid URL")
    }

    pub fn invalid_shortcode() -> Self {
        Self::new(
            InputField::CustomShortcode,
            "Shortcode must be 3-10 alphanumeric characters",
        )
    }

    pub fn invalid_validity() -> Self {
        Self::new(
            InputField::ValidityMinutes,
            "Validity must be a positive number",
        )
    }

    pub fn validity_too_long() -> Self {
        Self::new(
            InputField::ValidityMinutes,
            format!("Validity cannot exceed {} minutes", MAX_VALIDITY_MINUTES),
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check that `url` parses as an absolute URL with both a scheme and a host.
pub fn validate_url(url: &str) -> Result<Url, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::invalid_url());
    }

    let parsed = Url::parse(url).map_err(|_| ValidationError::invalid_url())?;
    if parsed.scheme().is_empty() || parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::invalid_url());
    }
    Ok(parsed)
}

pub fn is_valid_url(url: &str) -> bool {
    validate_url(url).is_ok()
}

/// 3 到 10 个 ASCII 字母或数字
pub fn is_valid_shortcode(code: &str) -> bool {
    (SHORTCODE_MIN_LEN..=SHORTCODE_MAX_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

pub fn validate_shortcode(code: &str) -> Result<(), ValidationError> {
    if is_valid_shortcode(code) {
        Ok(())
    } else {
        Err(ValidationError::invalid_shortcode())
    }
}

/// 1 到 [`MAX_VALIDITY_MINUTES`] 分钟
pub fn validate_validity_minutes(minutes: i64) -> Result<i64, ValidationError> {
    if minutes < 1 {
        Err(ValidationError::invalid_validity())
    } else if minutes > MAX_VALIDITY_MINUTES {
        Err(ValidationError::validity_too_long())
    } else {
        Ok(minutes)
    }
}

/// Parse a validity value typed by a user.
///
/// Blank input yields `None` (the caller falls back to its default);
/// anything that is not a positive integer is rejected.
pub fn parse_validity_minutes(input: &str) -> Result<Option<i64>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let minutes = input
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_validity())?;
    validate_validity_minutes(minutes).map(Some)
}
