//! Channel attribution entity (one row per pageview row)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "channel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub seq: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub utm_source: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub utm_campaign: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub utm_medium: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gclid: Option<String>,
    /// Channel label, e.g. "Paid Search"
    #[sea_orm(column_type = "String(StringLen::N(32))", nullable)]
    pub channel: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
