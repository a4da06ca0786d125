//! Rows inserted straight into the test database, bypassing repositories.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_YEAR, error::TestError, TestContext};

impl TestContext {
    pub fn store<'a>(&'a mut self) -> StoreFixtures<'a> {
        StoreFixtures { setup: self }
    }
}

pub struct StoreFixtures<'a> {
    pub setup: &'a mut TestContext,
}

impl<'a> StoreFixtures<'a> {
    /// Insert an event dated mid-March of the test season.
    pub async fn insert_mock_event(&self, key: &str) -> Result<entity::event::Model, TestError> {
        let date = NaiveDate::from_ymd_opt(TEST_YEAR, 3, 14).unwrap_or_default();

        Ok(entity::prelude::Event::insert(entity::event::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            name: ActiveValue::Set(format!("{} Regional", key)),
            date: ActiveValue::Set(date),
            year: ActiveValue::Set(TEST_YEAR),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert an unplayed match with no winner.
    pub async fn insert_mock_match(
        &self,
        key: &str,
        event_key: &str,
    ) -> Result<entity::event_match::Model, TestError> {
        self.insert_mock_match_with_winner(key, event_key, "").await
    }

    /// Insert a match with a recorded winner and actual time.
    pub async fn insert_mock_match_with_winner(
        &self,
        key: &str,
        event_key: &str,
        winning_alliance: &str,
    ) -> Result<entity::event_match::Model, TestError> {
        let actual_time = (!winning_alliance.is_empty()).then_some(1742000300);

        Ok(
            entity::prelude::EventMatch::insert(entity::event_match::ActiveModel {
                key: ActiveValue::Set(key.to_string()),
                event_key: ActiveValue::Set(event_key.to_string()),
                predicted_time: ActiveValue::Set(Some(1742000000)),
                actual_time: ActiveValue::Set(actual_time),
                winning_alliance: ActiveValue::Set(winning_alliance.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an alliance together with one team slot per entry in `teams`.
    pub async fn insert_mock_alliance(
        &self,
        match_key: &str,
        is_blue: bool,
        score: i32,
        teams: &[&str],
    ) -> Result<entity::alliance::Model, TestError> {
        let alliance = entity::prelude::Alliance::insert(entity::alliance::ActiveModel {
            match_key: ActiveValue::Set(match_key.to_string()),
            is_blue: ActiveValue::Set(is_blue),
            score: ActiveValue::Set(score),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?;

        for team in teams {
            entity::prelude::AllianceTeam::insert(entity::alliance_team::ActiveModel {
                alliance_id: ActiveValue::Set(alliance.id),
                team_number: ActiveValue::Set(team.to_string()),
                predicted_contribution: ActiveValue::Set(None),
                actual_contribution: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?;
        }

        Ok(alliance)
    }

    /// Store a last-modified token for `resource`.
    pub async fn insert_mock_token(
        &self,
        resource: &str,
        token: &str,
    ) -> Result<entity::modified_token::Model, TestError> {
        Ok(
            entity::prelude::ModifiedToken::insert(entity::modified_token::ActiveModel {
                resource: ActiveValue::Set(resource.to_string()),
                token: ActiveValue::Set(token.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
