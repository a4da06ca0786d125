use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVENT_MATCH_EVENT_KEY: &str = "idx-event_match-event_key";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventMatch::Table)
                    .if_not_exists()
                    .col(pk_auto(EventMatch::Id))
                    .col(string_uniq(EventMatch::Key))
                    .col(string(EventMatch::EventKey))
                    .col(big_integer_null(EventMatch::PredictedTime))
                    .col(big_integer_null(EventMatch::ActualTime))
                    .col(string(EventMatch::WinningAlliance).default(""))
                    .col(timestamp(EventMatch::CreatedAt))
                    .col(timestamp(EventMatch::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Matches reference their event by key only; the feed can deliver a
        // match list before the event list has been synced.
        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_MATCH_EVENT_KEY)
                    .table(EventMatch::Table)
                    .col(EventMatch::EventKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVENT_MATCH_EVENT_KEY)
                    .table(EventMatch::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EventMatch::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EventMatch {
    Table,
    Id,
    Key,
    EventKey,
    PredictedTime,
    ActualTime,
    WinningAlliance,
    CreatedAt,
    UpdatedAt,
}
