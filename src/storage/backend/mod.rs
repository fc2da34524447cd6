//! SeaORM storage backend
//!
//! This module stores pageview and channel attribution rows using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod event_sink;
mod refresh;
mod report;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{ChannelizerError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{attribution_to_active_model, pageview_to_active_model};
pub use report::{CHANNEL_VIEW_NAME, ChannelCountRow, channel_view_sql};
pub use retry::RetryPolicy;

/// 批量插入时每条 INSERT 的行数
pub const INSERT_CHUNK_SIZE: usize = 500;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ChannelizerError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry: RetryPolicy,
}

impl SeaOrmStorage {
    /// 连接存储目标并运行迁移
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.as_str();
        if database_url.is_empty() {
            return Err(ChannelizerError::database_config(
                "database.database_url is not set",
            ));
        }

        let backend_name = infer_backend_from_url(database_url)?;
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, config.pool_size).await?
        };

        let storage = Self::from_connection(db, &backend_name, RetryPolicy::from(config));
        run_migrations(&storage.db).await?;

        info!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 使用已有连接（不运行迁移）
    pub fn from_connection(db: DatabaseConnection, backend_name: &str, retry: RetryPolicy) -> Self {
        Self {
            db,
            backend_name: backend_name.to_string(),
            retry,
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
