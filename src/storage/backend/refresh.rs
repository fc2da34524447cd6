//! 全量刷新写入
//!
//! 每次运行在同一事务内清空 `pageviews` 和 `channel` 两张表并插入本批次数据；
//! 任一步失败整体回滚，两张表都保留上一次的数据，按 seq 的对齐关系不会被打破。

use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait, QueryOrder, TransactionTrait,
};
use tracing::debug;

use super::converters::{attribution_to_active_model, pageview_to_active_model};
use super::{INSERT_CHUNK_SIZE, SeaOrmStorage};
use crate::pipeline::BatchWritten;
use crate::tracking::MappedBatch;
use migration::entities::{channel_attribution, pageview};

impl SeaOrmStorage {
    /// 用本批次替换 `pageviews` 与 `channel` 的全部内容
    pub async fn replace_batch(&self, batch: &MappedBatch) -> Result<BatchWritten, DbErr> {
        let pageviews: Vec<pageview::ActiveModel> =
            batch.pageviews.iter().map(pageview_to_active_model).collect();
        let attributions: Vec<channel_attribution::ActiveModel> = batch
            .attributions
            .iter()
            .map(attribution_to_active_model)
            .collect();

        let db = &self.db;
        let pageviews = &pageviews;
        let attributions = &attributions;
        let written = self
            .retry
            .run("replace_batch", || async move {
                let txn = db.begin().await?;

                let pageviews_written = replace_all(&txn, "pageviews", pageviews).await?;
                let attributions_written = replace_all(&txn, "channel", attributions).await?;

                txn.commit().await?;
                Ok(BatchWritten {
                    pageviews: pageviews_written,
                    attributions: attributions_written,
                })
            })
            .await?;

        debug!(
            "pageviews/channel refreshed in {} database ({} / {} rows)",
            self.backend_name.to_uppercase(),
            written.pageviews,
            written.attributions
        );
        Ok(written)
    }

    /// 按 seq 读取全部 pageview 行
    pub async fn load_pageviews(&self) -> Result<Vec<pageview::Model>, DbErr> {
        pageview::Entity::find()
            .order_by_asc(pageview::Column::Seq)
            .all(&self.db)
            .await
    }

    /// 按 seq 读取全部归因行
    pub async fn load_attributions(&self) -> Result<Vec<channel_attribution::Model>, DbErr> {
        channel_attribution::Entity::find()
            .order_by_asc(channel_attribution::Column::Seq)
            .all(&self.db)
            .await
    }
}

/// 在事务内清空一张表并分块插入
async fn replace_all<E, A>(
    txn: &DatabaseTransaction,
    table: &str,
    models: &[A],
) -> Result<u64, DbErr>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E> + Clone + Send + Sync,
{
    let deleted = E::delete_many().exec(txn).await?.rows_affected;
    for chunk in models.chunks(INSERT_CHUNK_SIZE) {
        E::insert_many(chunk.iter().cloned()).exec(txn).await?;
    }

    debug!("'{}': replaced {} old rows with {}", table, deleted, models.len());
    Ok(models.len() as u64)
}
