//! 渠道汇总视图
//!
//! `filtered_pageviews`：只统计 action 为 pageview 且 referrer 包含品牌域名的
//! 行，按渠道分组计数。视图定义随品牌域名变化，每次运行重建。

use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, Statement};
use tracing::debug;

use super::SeaOrmStorage;

pub const CHANNEL_VIEW_NAME: &str = "filtered_pageviews";

/// 视图查询结果行
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ChannelCountRow {
    pub channel: Option<String>,
    pub pageview_count: i64,
}

/// 生成视图定义
///
/// `brand_domain` 直接拼入 SQL，调用方必须先通过
/// `config::validators::validate_brand_domain` 校验。
pub fn channel_view_sql(brand_domain: &str) -> String {
    format!(
        "CREATE VIEW {view} AS \
         SELECT COUNT(*) AS pageview_count, c.channel AS channel \
         FROM pageviews p JOIN channel c ON p.seq = c.seq \
         WHERE p.action = 'pageview' AND p.referrer_domain LIKE '%{domain}%' \
         GROUP BY c.channel",
        view = CHANNEL_VIEW_NAME,
        domain = brand_domain
    )
}

impl SeaOrmStorage {
    /// 删除并重建汇总视图
    pub async fn rebuild_channel_view(&self, brand_domain: &str) -> Result<(), DbErr> {
        crate::config::validators::validate_brand_domain(brand_domain)
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        self.db
            .execute_unprepared(&format!("DROP VIEW IF EXISTS {}", CHANNEL_VIEW_NAME))
            .await?;
        self.db
            .execute_unprepared(&channel_view_sql(brand_domain))
            .await?;

        debug!(
            "View {} rebuilt for brand domain '{}'",
            CHANNEL_VIEW_NAME, brand_domain
        );
        Ok(())
    }

    /// 读取汇总视图，按计数降序、渠道名升序
    pub async fn channel_report(&self) -> Result<Vec<ChannelCountRow>, DbErr> {
        let backend = self.db.get_database_backend();
        let sql = format!(
            "SELECT channel, pageview_count FROM {} ORDER BY pageview_count DESC, channel ASC",
            CHANNEL_VIEW_NAME
        );

        ChannelCountRow::find_by_statement(Statement::from_string(backend, sql))
            .all(&self.db)
            .await
    }
}
