use serde::{Deserialize, Serialize};

use crate::errors::{LinkpadError, Result};
use crate::utils::validators::{MAX_VALIDITY_MINUTES, SHORTCODE_MAX_LEN, SHORTCODE_MIN_LEN};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "linkpad.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - storage: 存储后端与键名
/// - shortener: 短码长度、默认有效期、批量上限
/// - remote_log: 远程日志收集端
/// - logging: 本地日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub shortener: ShortenerConfig,
    #[serde(default)]
    pub remote_log: RemoteLogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > linkpad.toml > 默认值
    /// ENV 前缀：LINKPAD，分隔符：__
    /// 示例：LINKPAD__STORAGE__PATH=/tmp/links.json
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("LINKPAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let len = self.shortener.code_length;
        if !(SHORTCODE_MIN_LEN..=SHORTCODE_MAX_LEN).contains(&len) {
            return Err(LinkpadError::config(format!(
                "shortener.code_length must be between {} and {}, got {}",
                SHORTCODE_MIN_LEN, SHORTCODE_MAX_LEN, len
            )));
        }
        let validity = self.shortener.default_validity_minutes;
        if !(1..=MAX_VALIDITY_MINUTES).contains(&validity) {
            return Err(LinkpadError::config(format!(
                "shortener.default_validity_minutes must be between 1 and {}, got {}",
                MAX_VALIDITY_MINUTES, validity
            )));
        }
        if self.shortener.max_batch < 1 {
            return Err(LinkpadError::config("shortener.max_batch must be at least 1"));
        }
        if self.storage.key.trim().is_empty() {
            return Err(LinkpadError::config("storage.key cannot be empty"));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// 0 disables the limit
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

/// 短链接生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_validity_minutes")]
    pub default_validity_minutes: i64,
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
}

/// 远程日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLogConfig {
    #[serde(default = "default_remote_log_enabled")]
    pub enabled: bool,
    #[serde(default = "default_remote_log_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_remote_log_stack")]
    pub stack: String,
    #[serde(default = "default_remote_log_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_flush_timeout_ms")]
    pub flush_timeout_ms: u64,
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_storage_path() -> String {
    "linkpad.json".to_string()
}

fn default_storage_key() -> String {
    "shortenedUrls".to_string()
}

fn default_quota_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_code_length() -> usize {
    crate::utils::DEFAULT_CODE_LENGTH
}

fn default_validity_minutes() -> i64 {
    30
}

fn default_max_batch() -> usize {
    5
}

fn default_remote_log_enabled() -> bool {
    true
}

fn default_remote_log_endpoint() -> String {
    "http://20.244.56.144/evaluation-service/logs".to_string()
}

fn default_remote_log_stack() -> String {
    "backend".to_string()
}

fn default_remote_log_timeout_ms() -> u64 {
    2000
}

fn default_flush_timeout_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    false
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
            key: default_storage_key(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            code_length: default_code_length(),
            default_validity_minutes: default_validity_minutes(),
            max_batch: default_max_batch(),
        }
    }
}

impl Default for RemoteLogConfig {
    fn default() -> Self {
        Self {
            enabled: default_remote_log_enabled(),
            endpoint: default_remote_log_endpoint(),
            stack: default_remote_log_stack(),
            timeout_ms: default_remote_log_timeout_ms(),
            flush_timeout_ms: default_flush_timeout_ms(),
            auth_token: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
