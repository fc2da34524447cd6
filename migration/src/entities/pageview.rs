//! Pageview entity (raw tracking log projection)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pageviews")]
pub struct Model {
    /// Position of the event in the loaded batch, shared with `channel.seq`
    #[sea_orm(primary_key, auto_increment = false)]
    pub seq: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub log_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cookie_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub location: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer_domain: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub log_ts: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub action: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
