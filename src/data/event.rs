use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::feed::FeedEvent;

pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    /// Creates a new instance of [`EventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert an event from the feed or merge it into the stored row with the same key
    ///
    /// An empty name from the feed keeps the stored name. `created_at` is preserved.
    pub async fn upsert(&self, event: FeedEvent) -> Result<entity::event::Model, DbErr> {
        let mut update_columns = vec![
            entity::event::Column::Date,
            entity::event::Column::Year,
            entity::event::Column::UpdatedAt,
        ];
        if !event.name.is_empty() {
            update_columns.push(entity::event::Column::Name);
        }

        let event = entity::event::ActiveModel {
            key: ActiveValue::Set(event.key),
            name: ActiveValue::Set(event.name),
            date: ActiveValue::Set(event.start_date),
            year: ActiveValue::Set(event.year),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::Event::insert(event)
            .on_conflict(
                OnConflict::column(entity::event::Column::Key)
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_key(&self, key: &str) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::Key.eq(key))
            .one(self.db)
            .await
    }

    /// Get every stored event of a season, earliest first
    pub async fn get_by_year(&self, year: i32) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::Year.eq(year))
            .order_by_asc(entity::event::Column::Date)
            .order_by_asc(entity::event::Column::Key)
            .all(self.db)
            .await
    }
}
