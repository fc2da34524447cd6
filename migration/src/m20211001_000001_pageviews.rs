//! pageviews 表迁移
//!
//! 原始追踪日志的投影，全部为可空文本列；`seq` 为事件在批次中的位置，
//! 与 `channel.seq` 一一对应。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pageviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pageviews::Seq)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pageviews::LogId).text().null())
                    .col(ColumnDef::new(Pageviews::CookieId).text().null())
                    .col(ColumnDef::new(Pageviews::Location).text().null())
                    .col(ColumnDef::new(Pageviews::ReferrerDomain).text().null())
                    .col(ColumnDef::new(Pageviews::LogTs).text().null())
                    .col(ColumnDef::new(Pageviews::Action).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pageviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pageviews {
    #[sea_orm(iden = "pageviews")]
    Table,
    Seq,
    LogId,
    CookieId,
    Location,
    ReferrerDomain,
    LogTs,
    Action,
}
