use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::feed::FeedMatch;

pub struct MatchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MatchRepository<'a, C> {
    /// Creates a new instance of [`MatchRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert a match from the feed or merge it into the stored row with the same key
    ///
    /// The feed regularly lags behind what has been recorded locally, so an absent predicted
    /// time, actual time, or winning alliance never overwrites a value already stored. Only
    /// fields the feed actually carries are written on conflict.
    ///
    /// # Arguments
    /// - `feed_match`: Match as read from the feed; its alliances are ignored here
    ///
    /// # Returns
    /// - [`entity::event_match::Model`]: The stored row after the merge
    /// - [`DbErr`]: If a database-related error occurs
    pub async fn upsert(&self, feed_match: &FeedMatch) -> Result<entity::event_match::Model, DbErr> {
        let winning_alliance = feed_match.winning_alliance.clone().unwrap_or_default();

        let mut update_columns = vec![
            entity::event_match::Column::EventKey,
            entity::event_match::Column::UpdatedAt,
        ];
        if feed_match.predicted_time.is_some() {
            update_columns.push(entity::event_match::Column::PredictedTime);
        }
        if feed_match.actual_time.is_some() {
            update_columns.push(entity::event_match::Column::ActualTime);
        }
        if !winning_alliance.is_empty() {
            update_columns.push(entity::event_match::Column::WinningAlliance);
        }

        let event_match = entity::event_match::ActiveModel {
            key: ActiveValue::Set(feed_match.key.clone()),
            event_key: ActiveValue::Set(feed_match.event_key.clone()),
            predicted_time: ActiveValue::Set(feed_match.predicted_time),
            actual_time: ActiveValue::Set(feed_match.actual_time),
            winning_alliance: ActiveValue::Set(winning_alliance),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::EventMatch::insert(event_match)
            .on_conflict(
                OnConflict::column(entity::event_match::Column::Key)
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_key(
        &self,
        key: &str,
    ) -> Result<Option<entity::event_match::Model>, DbErr> {
        entity::prelude::EventMatch::find()
            .filter(entity::event_match::Column::Key.eq(key))
            .one(self.db)
            .await
    }

    /// Get every stored match of an event in schedule order
    pub async fn get_by_event_key(
        &self,
        event_key: &str,
    ) -> Result<Vec<entity::event_match::Model>, DbErr> {
        entity::prelude::EventMatch::find()
            .filter(entity::event_match::Column::EventKey.eq(event_key))
            .order_by_asc(entity::event_match::Column::PredictedTime)
            .order_by_asc(entity::event_match::Column::Key)
            .all(self.db)
            .await
    }
}
