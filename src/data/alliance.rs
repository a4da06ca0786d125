use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::feed::FeedAlliance;

pub struct AllianceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceRepository<'a, C> {
    /// Creates a new instance of [`AllianceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create the alliance for one side of a match
    ///
    /// Fails with a unique constraint violation if the side already has an alliance.
    pub async fn create(
        &self,
        match_key: &str,
        is_blue: bool,
        score: i32,
    ) -> Result<entity::alliance::Model, DbErr> {
        let alliance = entity::alliance::ActiveModel {
            match_key: ActiveValue::Set(match_key.to_string()),
            is_blue: ActiveValue::Set(is_blue),
            score: ActiveValue::Set(score),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        alliance.insert(self.db).await
    }

    pub async fn get(
        &self,
        match_key: &str,
        is_blue: bool,
    ) -> Result<Option<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find()
            .filter(entity::alliance::Column::MatchKey.eq(match_key))
            .filter(entity::alliance::Column::IsBlue.eq(is_blue))
            .one(self.db)
            .await
    }

    /// Get an alliance and lock its row until the surrounding transaction ends
    ///
    /// Backends without row locks (SQLite) fall back to a plain read; there the database-wide
    /// write lock already serializes transactions.
    pub async fn get_for_update(
        &self,
        match_key: &str,
        is_blue: bool,
    ) -> Result<Option<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find()
            .filter(entity::alliance::Column::MatchKey.eq(match_key))
            .filter(entity::alliance::Column::IsBlue.eq(is_blue))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Get both alliances of a match, red first
    pub async fn get_by_match_key(
        &self,
        match_key: &str,
    ) -> Result<Vec<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find()
            .filter(entity::alliance::Column::MatchKey.eq(match_key))
            .order_by_asc(entity::alliance::Column::IsBlue)
            .all(self.db)
            .await
    }

    /// Overwrite the score of an alliance
    pub async fn update_score(
        &self,
        alliance: entity::alliance::Model,
        score: i32,
    ) -> Result<entity::alliance::Model, DbErr> {
        let mut alliance_am = alliance.into_active_model();
        alliance_am.score = ActiveValue::Set(score);
        alliance_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        alliance_am.update(self.db).await
    }

    /// Insert an alliance from the feed or merge it into the stored row for the same side
    ///
    /// Until a match is played the feed reports a negative score; such a score is stored as 0
    /// on insert and never replaces a score already stored.
    pub async fn upsert_from_feed(
        &self,
        match_key: &str,
        is_blue: bool,
        feed_alliance: &FeedAlliance,
    ) -> Result<entity::alliance::Model, DbErr> {
        let mut update_columns = vec![entity::alliance::Column::UpdatedAt];
        if feed_alliance.has_score() {
            update_columns.push(entity::alliance::Column::Score);
        }

        let alliance = entity::alliance::ActiveModel {
            match_key: ActiveValue::Set(match_key.to_string()),
            is_blue: ActiveValue::Set(is_blue),
            score: ActiveValue::Set(feed_alliance.score.max(0)),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::Alliance::insert(alliance)
            .on_conflict(
                OnConflict::columns([
                    entity::alliance::Column::MatchKey,
                    entity::alliance::Column::IsBlue,
                ])
                .update_columns(update_columns)
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }
}
