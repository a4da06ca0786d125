pub use sea_orm_migration::prelude::*;

mod m20251101_000001_event;
mod m20251101_000002_event_match;
mod m20251101_000003_alliance;
mod m20251101_000004_alliance_team;
mod m20251101_000005_report;
mod m20251101_000006_modified_token;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_event::Migration),
            Box::new(m20251101_000002_event_match::Migration),
            Box::new(m20251101_000003_alliance::Migration),
            Box::new(m20251101_000004_alliance_team::Migration),
            Box::new(m20251101_000005_report::Migration),
            Box::new(m20251101_000006_modified_token::Migration),
        ]
    }
}
