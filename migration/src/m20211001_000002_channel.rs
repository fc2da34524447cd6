//! channel 表迁移
//!
//! 每个事件的 UTM 参数、gclid 与归因渠道。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Channel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Channel::Seq)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Channel::UtmSource).text().null())
                    .col(ColumnDef::new(Channel::UtmCampaign).text().null())
                    .col(ColumnDef::new(Channel::UtmMedium).text().null())
                    .col(ColumnDef::new(Channel::Gclid).text().null())
                    .col(ColumnDef::new(Channel::Channel).string_len(32).null())
                    .to_owned(),
            )
            .await?;

        // 汇总视图按渠道分组
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_channel_channel")
                    .table(Channel::Table)
                    .col(Channel::Channel)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_channel_channel").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Channel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Channel {
    #[sea_orm(iden = "channel")]
    Table,
    Seq,
    UtmSource,
    UtmCampaign,
    UtmMedium,
    Gclid,
    Channel,
}
