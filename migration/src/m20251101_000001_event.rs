use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVENT_YEAR: &str = "idx-event-year";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string_uniq(Event::Key))
                    .col(string(Event::Name))
                    .col(date(Event::Date))
                    .col(integer(Event::Year))
                    .col(timestamp(Event::CreatedAt))
                    .col(timestamp(Event::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_YEAR)
                    .table(Event::Table)
                    .col(Event::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_EVENT_YEAR).table(Event::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Key,
    Name,
    Date,
    Year,
    CreatedAt,
    UpdatedAt,
}
