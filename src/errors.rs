use std::fmt;

use crate::utils::ValidationError;

#[derive(Debug, Clone)]
pub enum LinkpadError {
    Validation(ValidationError),
    DuplicateShortcode(String),
    NotFound(String),
    Expired(String),
    Storage(String),
    QuotaExceeded(String),
    Serialization(String),
    Config(String),
}

impl LinkpadError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkpadError::Validation(_) => "E001",
            LinkpadError::DuplicateShortcode(_) => "E002",
            LinkpadError::NotFound(_) => "E003",
            LinkpadError::Expired(_) => "E004",
            LinkpadError::Storage(_) => "E005",
            LinkpadError::QuotaExceeded(_) => "E006",
            LinkpadError::Serialization(_) => "E007",
            LinkpadError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkpadError::Validation(_) => "Validation Error",
            LinkpadError::DuplicateShortcode(_) => "Duplicate Shortcode",
            LinkpadError::NotFound(_) => "Not Found",
            LinkpadError::Expired(_) => "Link Expired",
            LinkpadError::Storage(_) => "Storage Error",
            LinkpadError::QuotaExceeded(_) => "Storage Quota Exceeded",
            LinkpadError::Serialization(_) => "Serialization Error",
            LinkpadError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkpadError::Validation(err) => &err.message,
            LinkpadError::DuplicateShortcode(msg) => msg,
            LinkpadError::NotFound(msg) => msg,
            LinkpadError::Expired(msg) => msg,
            LinkpadError::Storage(msg) => msg,
            LinkpadError::QuotaExceeded(msg) => msg,
            LinkpadError::Serialization(msg) => msg,
            LinkpadError::Config(msg) => msg,
        }
    }

    /// The field-scoped failure, if this is a validation error
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            LinkpadError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkpadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkpadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkpadError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

// 便捷的构造函数
impl LinkpadError {
    pub fn duplicate_shortcode<T: Into<String>>(msg: T) -> Self {
        LinkpadError::DuplicateShortcode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkpadError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        LinkpadError::Expired(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        LinkpadError::Storage(msg.into())
    }

    pub fn quota_exceeded<T: Into<String>>(msg: T) -> Self {
        LinkpadError::QuotaExceeded(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkpadError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkpadError::Config(msg.into())
    }
}

impl From<ValidationError> for LinkpadError {
    fn from(err: ValidationError) -> Self {
        LinkpadError::Validation(err)
    }
}

impl From<std::io::Error> for LinkpadError {
    fn from(err: std::io::Error) -> Self {
        LinkpadError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LinkpadError {
    fn from(err: serde_json::Error) -> Self {
        LinkpadError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LinkpadError {
    fn from(err: config::ConfigError) -> Self {
        LinkpadError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkpadError>;
