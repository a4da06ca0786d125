use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_event_match::EventMatch;

static IDX_ALLIANCE_MATCH_KEY_IS_BLUE: &str = "idx-alliance-match_key-is_blue";
static FK_ALLIANCE_MATCH_KEY: &str = "fk-alliance-match_key";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alliance::Table)
                    .if_not_exists()
                    .col(pk_auto(Alliance::Id))
                    .col(string(Alliance::MatchKey))
                    .col(boolean(Alliance::IsBlue))
                    .col(integer(Alliance::Score).default(0))
                    .col(timestamp(Alliance::CreatedAt))
                    .col(timestamp(Alliance::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_MATCH_KEY)
                            .from(Alliance::Table, Alliance::MatchKey)
                            .to(EventMatch::Table, EventMatch::Key)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One red and one blue alliance per match
        manager
            .create_index(
                Index::create()
                    .name(IDX_ALLIANCE_MATCH_KEY_IS_BLUE)
                    .table(Alliance::Table)
                    .col(Alliance::MatchKey)
                    .col(Alliance::IsBlue)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ALLIANCE_MATCH_KEY_IS_BLUE)
                    .table(Alliance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Alliance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Alliance {
    Table,
    Id,
    MatchKey,
    IsBlue,
    Score,
    CreatedAt,
    UpdatedAt,
}
