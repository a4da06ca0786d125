use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000003_alliance::Alliance;

static IDX_ALLIANCE_TEAM_ALLIANCE_ID_TEAM_NUMBER: &str =
    "idx-alliance_team-alliance_id-team_number";
static FK_ALLIANCE_TEAM_ALLIANCE_ID: &str = "fk-alliance_team-alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AllianceTeam::Table)
                    .if_not_exists()
                    .col(pk_auto(AllianceTeam::Id))
                    .col(integer(AllianceTeam::AllianceId))
                    .col(string(AllianceTeam::TeamNumber))
                    .col(json_null(AllianceTeam::PredictedContribution))
                    .col(json_null(AllianceTeam::ActualContribution))
                    .col(timestamp(AllianceTeam::CreatedAt))
                    .col(timestamp(AllianceTeam::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_TEAM_ALLIANCE_ID)
                            .from(AllianceTeam::Table, AllianceTeam::AllianceId)
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
                    .name(IDX_ALLIANCE_TEAM_ALLIANCE_ID_TEAM_NUMBER)
                    .table(AllianceTeam::Table)
                    .col(AllianceTeam::AllianceId)
                    .col(AllianceTeam::TeamNumber)
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
                    .name(IDX_ALLIANCE_TEAM_ALLIANCE_ID_TEAM_NUMBER)
                    .table(AllianceTeam::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AllianceTeam::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AllianceTeam {
    Table,
    Id,
    AllianceId,
    TeamNumber,
    PredictedContribution,
    ActualContribution,
    CreatedAt,
    UpdatedAt,
}
