use serde::{Deserialize, Serialize};

use crate::model::feed::FeedMatch;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDto {
    pub key: String,
    pub event_key: String,
    pub predicted_time: Option<i64>,
    pub actual_time: Option<i64>,
    /// `"red"`, `"blue"`, or empty while the result is unknown.
    pub winning_alliance: String,
}

impl From<entity::event_match::Model> for MatchDto {
    fn from(model: entity::event_match::Model) -> Self {
        Self {
            key: model.key,
            event_key: model.event_key,
            predicted_time: model.predicted_time,
            actual_time: model.actual_time,
            winning_alliance: model.winning_alliance,
        }
    }
}

impl From<FeedMatch> for MatchDto {
    fn from(feed_match: FeedMatch) -> Self {
        Self {
            key: feed_match.key,
            event_key: feed_match.event_key,
            predicted_time: feed_match.predicted_time,
            actual_time: feed_match.actual_time,
            winning_alliance: feed_match.winning_alliance.unwrap_or_default(),
        }
    }
}
