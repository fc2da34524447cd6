pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20211001_000001_pageviews;
mod m20211001_000002_channel;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20211001_000001_pageviews::Migration),
            Box::new(m20211001_000002_channel::Migration),
        ]
    }
}
