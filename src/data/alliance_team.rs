use chrono::Utc;
use sea_orm::{
    prelude::Json, sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait,
    ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::model::alliance::MAX_ALLIANCE_TEAMS;

pub struct AllianceTeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceTeamRepository<'a, C> {
    /// Creates a new instance of [`AllianceTeamRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a team slot on an alliance
    ///
    /// Fails with a unique constraint violation if the team already holds a slot on the
    /// alliance. The three-team cap is checked by callers.
    pub async fn create(
        &self,
        alliance_id: i32,
        team_number: &str,
    ) -> Result<entity::alliance_team::Model, DbErr> {
        let slot = entity::alliance_team::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            team_number: ActiveValue::Set(team_number.to_string()),
            predicted_contribution: ActiveValue::Set(None),
            actual_contribution: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        slot.insert(self.db).await
    }

    /// Get the slots of an alliance in the order they were filled
    pub async fn get_by_alliance_id(
        &self,
        alliance_id: i32,
    ) -> Result<Vec<entity::alliance_team::Model>, DbErr> {
        entity::prelude::AllianceTeam::find()
            .filter(entity::alliance_team::Column::AllianceId.eq(alliance_id))
            .order_by_asc(entity::alliance_team::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_alliance_ids(
        &self,
        alliance_ids: &[i32],
    ) -> Result<Vec<entity::alliance_team::Model>, DbErr> {
        entity::prelude::AllianceTeam::find()
            .filter(entity::alliance_team::Column::AllianceId.is_in(alliance_ids.iter().copied()))
            .order_by_asc(entity::alliance_team::Column::Id)
            .all(self.db)
            .await
    }

    /// Add slots for any of `team_numbers` the alliance does not hold yet
    ///
    /// Teams beyond the three-team cap are skipped, as are teams a concurrent writer inserted
    /// first.
    ///
    /// # Returns
    /// - `usize`: Number of slots inserted
    /// - [`DbErr`]: If a database-related error occurs
    pub async fn insert_missing(
        &self,
        alliance_id: i32,
        team_numbers: &[String],
    ) -> Result<usize, DbErr> {
        let existing = self.get_by_alliance_id(alliance_id).await?;
        let mut filled = existing.len();
        let mut inserted = 0;

        for team_number in team_numbers {
            if filled >= MAX_ALLIANCE_TEAMS {
                break;
            }
            if existing.iter().any(|slot| &slot.team_number == team_number) {
                continue;
            }

            let slot = entity::alliance_team::ActiveModel {
                alliance_id: ActiveValue::Set(alliance_id),
                team_number: ActiveValue::Set(team_number.clone()),
                predicted_contribution: ActiveValue::Set(None),
                actual_contribution: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            };

            let rows = entity::prelude::AllianceTeam::insert(slot)
                .on_conflict(
                    OnConflict::columns([
                        entity::alliance_team::Column::AllianceId,
                        entity::alliance_team::Column::TeamNumber,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(self.db)
                .await?;

            if rows > 0 {
                filled += 1;
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    /// Attach contribution payloads computed by the analysis module to a slot
    ///
    /// Called by the analysis collaborator after it scores a match; nothing in the sync or
    /// report flows writes contributions.
    ///
    /// `None` leaves the corresponding payload as stored.
    ///
    /// # Returns
    /// - `Some`: The updated slot
    /// - `None`: If the team holds no slot on the alliance
    pub async fn set_contributions(
        &self,
        alliance_id: i32,
        team_number: &str,
        predicted: Option<Json>,
        actual: Option<Json>,
    ) -> Result<Option<entity::alliance_team::Model>, DbErr> {
        let Some(slot) = entity::prelude::AllianceTeam::find()
            .filter(entity::alliance_team::Column::AllianceId.eq(alliance_id))
            .filter(entity::alliance_team::Column::TeamNumber.eq(team_number))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut slot_am = slot.into_active_model();
        if let Some(predicted) = predicted {
            slot_am.predicted_contribution = ActiveValue::Set(Some(predicted));
        }
        if let Some(actual) = actual {
            slot_am.actual_contribution = ActiveValue::Set(Some(actual));
        }
        slot_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(slot_am.update(self.db).await?))
    }
}
