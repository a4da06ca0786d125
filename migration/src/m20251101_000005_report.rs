use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000003_alliance::Alliance;

static IDX_REPORT_ALLIANCE_ID_TEAM_NUMBER: &str = "idx-report-alliance_id-team_number";
static FK_REPORT_ALLIANCE_ID: &str = "fk-report-alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(pk_auto(Report::Id))
                    .col(integer(Report::AllianceId))
                    .col(string(Report::TeamNumber))
                    .col(string(Report::Reporter).default(""))
                    .col(integer(Report::Score))
                    .col(json(Report::AutoStats))
                    .col(json(Report::TeleopStats))
                    .col(timestamp(Report::CreatedAt))
                    .col(timestamp(Report::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_REPORT_ALLIANCE_ID)
                            .from(Report::Table, Report::AllianceId)
                            .to(Alliance::Table, Alliance::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REPORT_ALLIANCE_ID_TEAM_NUMBER)
                    .table(Report::Table)
                    .col(Report::AllianceId)
                    .col(Report::TeamNumber)
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
                    .name(IDX_REPORT_ALLIANCE_ID_TEAM_NUMBER)
                    .table(Report::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Report {
    Table,
    Id,
    AllianceId,
    TeamNumber,
    Reporter,
    Score,
    AutoStats,
    TeleopStats,
    CreatedAt,
    UpdatedAt,
}
