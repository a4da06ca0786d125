use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::feed::FeedEvent;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDto {
    pub key: String,
    pub name: String,
    pub date: NaiveDate,
}

impl From<entity::event::Model> for EventDto {
    fn from(model: entity::event::Model) -> Self {
        Self {
            key: model.key,
            name: model.name,
            date: model.date,
        }
    }
}

impl From<FeedEvent> for EventDto {
    fn from(event: FeedEvent) -> Self {
        Self {
            key: event.key,
            name: event.name,
            date: event.start_date,
        }
    }
}
