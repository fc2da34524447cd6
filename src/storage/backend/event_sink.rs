//! EventSink implementation for SeaOrmStorage

use async_trait::async_trait;

use super::SeaOrmStorage;
use crate::pipeline::{BatchWritten, ChannelCount, EventSink};
use crate::tracking::MappedBatch;

#[async_trait]
impl EventSink for SeaOrmStorage {
    async fn replace_batch(&self, batch: &MappedBatch) -> anyhow::Result<BatchWritten> {
        Ok(SeaOrmStorage::replace_batch(self, batch).await?)
    }

    async fn rebuild_channel_view(&self, brand_domain: &str) -> anyhow::Result<()> {
        Ok(SeaOrmStorage::rebuild_channel_view(self, brand_domain).await?)
    }

    async fn channel_report(&self) -> anyhow::Result<Vec<ChannelCount>> {
        let rows = SeaOrmStorage::channel_report(self).await?;
        Ok(rows
            .into_iter()
            .map(|row| ChannelCount {
                channel: row.channel,
                // COUNT(*) 不会为负
                pageview_count: row.pageview_count.max(0) as u64,
            })
            .collect())
    }
}
