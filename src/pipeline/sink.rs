use serde::Serialize;

use crate::tracking::MappedBatch;

/// 汇总视图中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelCount {
    /// 渠道标签；`channel` 表中缺失的行汇总为 `None`
    pub channel: Option<String>,
    pub pageview_count: u64,
}

/// 一次全量刷新写入的行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchWritten {
    pub pageviews: u64,
    pub attributions: u64,
}

/// 存储 Sink（全量刷新模式）
#[async_trait::async_trait]
pub trait EventSink: Send + Sync {
    /// 用本批次原子地替换全部 pageview 行和归因行
    ///
    /// 失败时两张表都必须保持上一次的内容。
    async fn replace_batch(&self, batch: &MappedBatch) -> anyhow::Result<BatchWritten>;

    /// 按品牌域名重建汇总视图
    async fn rebuild_channel_view(&self, brand_domain: &str) -> anyhow::Result<()>;

    /// 读取汇总视图
    async fn channel_report(&self) -> anyhow::Result<Vec<ChannelCount>>;
}
