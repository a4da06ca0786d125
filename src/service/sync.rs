use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::{
    data::{
        AllianceRepository, AllianceTeamRepository, EventRepository, MatchRepository,
        ModifiedTokenRepository,
    },
    error::{sync::SyncError, Error},
    feed::{FeedClient, FeedResponse},
    model::{
        event::EventDto,
        event_match::MatchDto,
        feed::{FeedEvent, FeedMatch},
    },
    service::bulk::BulkUpsertEngine,
};

/// Token resource name of the season's event listing.
pub static EVENTS_RESOURCE: &str = "events";

/// Stored form of the events token: the season it was fetched for, then the feed's value.
///
/// Listings of different seasons share [`EVENTS_RESOURCE`], so the season travels with the token
/// and a token fetched for another season is never replayed.
pub fn season_token(year: i32, token: &str) -> String {
    format!("{}|{}", year, token)
}

fn token_for_season(stored: Option<String>, year: i32) -> Option<String> {
    let stored = stored?;
    let (season, token) = stored.split_once('|')?;

    (season.parse::<i32>().ok()? == year).then(|| token.to_string())
}

pub struct SyncOrchestrator<'a> {
    db: &'a DatabaseConnection,
    feed: &'a FeedClient,
    year: i32,
    bulk: BulkUpsertEngine,
}

impl<'a> SyncOrchestrator<'a> {
    /// Creates a new instance of [`SyncOrchestrator`]
    ///
    /// # Arguments
    /// - `year`: Season whose events [`Self::get_events`] synchronizes
    /// - `worker_count`: Maximum number of upserts in flight per batch
    pub fn new(
        db: &'a DatabaseConnection,
        feed: &'a FeedClient,
        year: i32,
        worker_count: usize,
    ) -> Self {
        Self {
            db,
            feed,
            year,
            bulk: BulkUpsertEngine::new(worker_count),
        }
    }

    /// Synchronize the season's events from the feed
    ///
    /// The stored token is replayed so an unchanged listing is answered from the database
    /// without touching the token. A token stored for another season is not replayed. A changed listing has its new token persisted first, then
    /// every event is upserted.
    ///
    /// # Returns
    /// - `Ok(Vec<EventDto>)`: Stored events if the feed reported no change, otherwise the
    ///   events just fetched
    /// - `Err(Error::FeedError(_))`: The feed could not be fetched; nothing was written
    /// - `Err(Error::SyncError(SyncError::BatchFailed { .. }))`: Some events failed to store;
    ///   each failure has been logged and the rest were stored
    /// - `Err(Error::DbErr(_))`: The token could not be read or written
    pub async fn get_events(&self) -> Result<Vec<EventDto>, Error> {
        let token_repo = ModifiedTokenRepository::new(self.db);

        let token = token_for_season(token_repo.get(EVENTS_RESOURCE).await?, self.year);
        let (events, new_token) = match self.feed.events(self.year, token.as_deref()).await? {
            FeedResponse::Unmodified => {
                let stored = EventRepository::new(self.db).get_by_year(self.year).await?;
                return Ok(stored.into_iter().map(EventDto::from).collect());
            }
            FeedResponse::Modified { records, token } => (records, token),
        };

        if let Some(new_token) = new_token {
            token_repo
                .set(EVENTS_RESOURCE, &season_token(self.year, &new_token))
                .await?;
        }

        let fetched: Vec<EventDto> = events.iter().cloned().map(EventDto::from).collect();
        let total = events.len();

        let failures = self
            .bulk
            .upsert_all(events, |event| self.upsert_event(event))
            .await;
        check_batch("events", failures.len(), total)?;

        info!(year = self.year, total, "Synchronized events");

        Ok(fetched)
    }

    /// Synchronize the matches of one event from the feed
    ///
    /// Same flow as [`Self::get_events`] with the event key as token resource. Each match is
    /// stored in its own transaction together with both alliances and their team slots.
    pub async fn get_matches_for_event(&self, event_key: &str) -> Result<Vec<MatchDto>, Error> {
        let token_repo = ModifiedTokenRepository::new(self.db);

        let token = token_repo.get(event_key).await?;
        let (matches, new_token) = match self
            .feed
            .event_matches(event_key, token.as_deref())
            .await?
        {
            FeedResponse::Unmodified => {
                let stored = MatchRepository::new(self.db)
                    .get_by_event_key(event_key)
                    .await?;
                return Ok(stored.into_iter().map(MatchDto::from).collect());
            }
            FeedResponse::Modified { records, token } => (records, token),
        };

        if let Some(new_token) = new_token {
            token_repo.set(event_key, &new_token).await?;
        }

        let fetched: Vec<MatchDto> = matches.iter().cloned().map(MatchDto::from).collect();
        let total = matches.len();

        let failures = self
            .bulk
            .upsert_all(matches, |feed_match| self.upsert_match(feed_match))
            .await;
        check_batch("matches", failures.len(), total)?;

        info!(event_key, total, "Synchronized matches");

        Ok(fetched)
    }

    async fn upsert_event(&self, event: FeedEvent) -> Result<(), SyncError> {
        let key = event.key.clone();

        EventRepository::new(self.db)
            .upsert(event)
            .await
            .map(|_| ())
            .map_err(|source| SyncError::ItemFailed { key, source })
    }

    async fn upsert_match(&self, feed_match: FeedMatch) -> Result<(), SyncError> {
        self.store_match(&feed_match)
            .await
            .map_err(|source| SyncError::ItemFailed {
                key: feed_match.key.clone(),
                source,
            })
    }

    async fn store_match(&self, feed_match: &FeedMatch) -> Result<(), sea_orm::DbErr> {
        let txn = self.db.begin().await?;

        MatchRepository::new(&txn).upsert(feed_match).await?;

        if let Some(alliances) = &feed_match.alliances {
            let alliance_repo = AllianceRepository::new(&txn);
            let team_repo = AllianceTeamRepository::new(&txn);

            for (is_blue, feed_alliance) in [(false, &alliances.red), (true, &alliances.blue)] {
                let alliance = alliance_repo
                    .upsert_from_feed(&feed_match.key, is_blue, feed_alliance)
                    .await?;
                team_repo
                    .insert_missing(alliance.id, &feed_alliance.team_numbers())
                    .await?;
            }
        }

        txn.commit().await
    }
}

fn check_batch(resource: &str, failed: usize, total: usize) -> Result<(), SyncError> {
    if failed == 0 {
        return Ok(());
    }

    Err(SyncError::BatchFailed {
        resource: resource.to_string(),
        failed,
        total,
    })
}
