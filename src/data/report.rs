use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};
use serde_json::Value;

use crate::model::report::ReportDto;

pub struct ReportRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReportRepository<'a, C> {
    /// Creates a new instance of [`ReportRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create the report of a team on an alliance
    ///
    /// The stored team number is `team_number`, not the one embedded in `report`.
    pub async fn create(
        &self,
        alliance_id: i32,
        team_number: &str,
        report: &ReportDto,
    ) -> Result<entity::report::Model, DbErr> {
        self.active_model(alliance_id, team_number, report)
            .insert(self.db)
            .await
    }

    /// Write the report of a team on an alliance, replacing the reporter, score, and stats of
    /// any report already stored for that team
    pub async fn upsert(
        &self,
        alliance_id: i32,
        team_number: &str,
        report: &ReportDto,
    ) -> Result<entity::report::Model, DbErr> {
        entity::prelude::Report::insert(self.active_model(alliance_id, team_number, report))
            .on_conflict(
                OnConflict::columns([
                    entity::report::Column::AllianceId,
                    entity::report::Column::TeamNumber,
                ])
                .update_columns([
                    entity::report::Column::Reporter,
                    entity::report::Column::Score,
                    entity::report::Column::AutoStats,
                    entity::report::Column::TeleopStats,
                    entity::report::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get(
        &self,
        alliance_id: i32,
        team_number: &str,
    ) -> Result<Option<entity::report::Model>, DbErr> {
        entity::prelude::Report::find()
            .filter(entity::report::Column::AllianceId.eq(alliance_id))
            .filter(entity::report::Column::TeamNumber.eq(team_number))
            .one(self.db)
            .await
    }

    pub async fn get_by_alliance_ids(
        &self,
        alliance_ids: &[i32],
    ) -> Result<Vec<entity::report::Model>, DbErr> {
        entity::prelude::Report::find()
            .filter(entity::report::Column::AllianceId.is_in(alliance_ids.iter().copied()))
            .order_by_asc(entity::report::Column::Id)
            .all(self.db)
            .await
    }

    fn active_model(
        &self,
        alliance_id: i32,
        team_number: &str,
        report: &ReportDto,
    ) -> entity::report::ActiveModel {
        entity::report::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            team_number: ActiveValue::Set(team_number.to_string()),
            reporter: ActiveValue::Set(report.reporter.clone()),
            score: ActiveValue::Set(report.score),
            auto_stats: ActiveValue::Set(Value::Object(report.stats.auto.clone())),
            teleop_stats: ActiveValue::Set(Value::Object(report.stats.teleop.clone())),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
