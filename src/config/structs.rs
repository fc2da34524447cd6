use serde::{Deserialize, Serialize};

use crate::errors::{ChannelizerError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，示例：CHANNELIZER__API__API_KEY=...
pub const ENV_PREFIX: &str = "CHANNELIZER";

/// 静态配置（从 TOML 与环境变量加载，启动时使用）
///
/// - api: 追踪日志 API 地址、密钥、日期范围与分页
/// - database: 存储目标与重试
/// - report: 汇总视图使用的品牌域名
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// 显式传入的路径必须存在；默认路径不存在时只使用默认值与环境变量。
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ChannelizerError::config(format!("Failed to build config: {}", e)))?;

        let config = settings.try_deserialize::<StaticConfig>().map_err(|e| {
            ChannelizerError::config(format!("Failed to deserialize config: {}", e))
        })?;

        if std::path::Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChannelizerError::serialization(e.to_string()))?;

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

/// 追踪日志 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,
    /// 通过 `x-api-key` 请求头发送，没有默认值
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_from_date")]
    pub from_date: Option<String>,
    #[serde(default = "default_to_date")]
    pub to_date: Option<String>,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 汇总视图配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 只统计 referrer_domain 包含该片段的 pageview
    #[serde(default = "default_brand_domain")]
    pub brand_domain: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_api_base_url() -> String {
    "https://de-demo-api.adtriba.app/".to_string()
}

fn default_api_endpoint() -> String {
    "v1/api/data".to_string()
}

fn default_from_date() -> Option<String> {
    Some("2021-08-01".to_string())
}

fn default_to_date() -> Option<String> {
    Some("2021-09-30".to_string())
}

fn default_page_limit() -> u32 {
    100_000
}

fn default_max_pages() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_database_url() -> String {
    "sqlite://fashion_brand_logs.db".to_string()
}

fn default_database_pool_size() -> u32 {
    5
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_brand_domain() -> String {
    "fashion-brand.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            endpoint: default_api_endpoint(),
            api_key: String::new(),
            from_date: default_from_date(),
            to_date: default_to_date(),
            page_limit: default_page_limit(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            brand_domain: default_brand_domain(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_demo_setup() {
        let config = StaticConfig::default();
        assert_eq!(config.api.base_url, "https://de-demo-api.adtriba.app/");
        assert_eq!(config.api.endpoint, "v1/api/data");
        assert_eq!(config.api.from_date.as_deref(), Some("2021-08-01"));
        assert_eq!(config.api.to_date.as_deref(), Some("2021-09-30"));
        assert!(config.api.api_key.is_empty());
        assert_eq!(config.report.brand_domain, "fashion-brand.com");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sample_config_parses_back() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[api]"));
        assert!(sample.contains("[database]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.api.page_limit, default_page_limit());
        assert_eq!(parsed.database.database_url, default_database_url());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [api]
            api_key = "secret"

            [report]
            brand_domain = "shop.example"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.api.api_key, "secret");
        assert_eq!(parsed.api.endpoint, "v1/api/data");
        assert_eq!(parsed.report.brand_domain, "shop.example");
        assert_eq!(parsed.database.retry_count, 3);
    }
}
