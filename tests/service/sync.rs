//! End-to-end tests for SyncOrchestrator.
//!
//! This module verifies the event and match synchronization flows against a mock feed,
//! including conditional requests answered with 304 Not Modified, the merge policy for
//! fields the feed leaves empty, and token persistence.

use scoutsync::{
    data::{EventRepository, MatchRepository, ModifiedTokenRepository},
    feed::FeedClient,
    service::{
        sync::{season_token, EVENTS_RESOURCE},
        SyncOrchestrator,
    },
};
use mockito::Matcher;
use scoutsync_test_utils::prelude::*;
use sea_orm::EntityTrait;
use serde_json::json;

static FIRST_TOKEN: &str = "Mon, 03 Mar 2025 10:00:00 GMT";
static SECOND_TOKEN: &str = "Tue, 04 Mar 2025 10:00:00 GMT";

fn feed(test: &TestContext) -> FeedClient {
    FeedClient::new(&test.feed_url(), TEST_FEED_API_KEY, TEST_USER_AGENT).unwrap()
}

/// Tests getting events when the feed reports no change.
///
/// Verifies that the stored token is replayed, the 304 answer is served from the database,
/// and the token is not rewritten.
///
/// Expected: Ok with the stored event, token unchanged
#[tokio::test]
async fn unmodified_events_served_from_store() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_event("2025casj")
        .with_token(EVENTS_RESOURCE, &season_token(TEST_YEAR, FIRST_TOKEN))
        .with_not_modified_endpoint("/events/2025", FIRST_TOKEN, 1)
        .build()
        .await?;
    let feed = feed(&test);

    let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, 4);
    let result = sync.get_events().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let events = result.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key, "2025casj");

    let token = ModifiedTokenRepository::new(&test.db)
        .get(EVENTS_RESOURCE)
        .await?;
    assert_eq!(token, Some(season_token(TEST_YEAR, FIRST_TOKEN)));

    let stored = entity::prelude::ModifiedToken::find()
        .all(&test.db)
        .await?;
    assert_eq!(stored.len(), 1);

    test.assert_mocks();

    Ok(())
}

/// Tests that a newer listing replaces the stored token.
///
/// Expected: Ok with fetched events, token replaced by the response's Last-Modified
#[tokio::test]
async fn modified_events_replace_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_token(EVENTS_RESOURCE, &season_token(TEST_YEAR, FIRST_TOKEN))
        .with_events_endpoint(
            TEST_YEAR,
            vec![factory::mock_event("2025casj")],
            Some(SECOND_TOKEN),
            1,
        )
        .build()
        .await?;
    let feed = feed(&test);

    let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, 4);
    let result = sync.get_events().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let token = ModifiedTokenRepository::new(&test.db)
        .get(EVENTS_RESOURCE)
        .await?;
    assert_eq!(token, Some(season_token(TEST_YEAR, SECOND_TOKEN)));
    assert!(EventRepository::new(&test.db)
        .get_by_key("2025casj")
        .await?
        .is_some());

    test.assert_mocks();

    Ok(())
}

/// Tests getting events after the configured season changed.
///
/// Verifies that a token stored for the previous season is not sent as `If-Modified-Since`
/// to the new season's listing, so the feed cannot answer it with 304, and that the new
/// listing's token replaces it.
///
/// Expected: Ok with the fetched event, token scoped to the new season
#[tokio::test]
async fn token_from_other_season_not_replayed() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_token(EVENTS_RESOURCE, &season_token(TEST_YEAR - 1, FIRST_TOKEN))
        .with_not_modified_endpoint("/events/2025", FIRST_TOKEN, 0)
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/events/2025")
                .match_header("if-modified-since", Matcher::Missing)
                .with_status(200)
                .with_header("last-modified", SECOND_TOKEN)
                .with_body(json!([factory::mock_event("2025casj")]).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let feed = feed(&test);

    let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, 4);
    let result = sync.get_events().await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap().len(), 1);

    let token = ModifiedTokenRepository::new(&test.db)
        .get(EVENTS_RESOURCE)
        .await?;
    assert_eq!(token, Some(season_token(TEST_YEAR, SECOND_TOKEN)));

    test.assert_mocks();

    Ok(())
}

/// Tests that a recorded winner survives a feed listing without one.
///
/// Verifies the merge policy: the stored match has winner "blue", the feed re-lists it with an
/// empty winner and no actual time.
///
/// Expected: Winner still "blue", actual time kept
#[tokio::test]
async fn sync_keeps_recorded_winner() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_schema()
        .with_event_matches_endpoint(
            "2025casj",
            vec![factory::mock_match("2025casj_qm1", "2025casj")],
            None,
            1,
        )
        .build()
        .await?;
    test.store()
        .insert_mock_match_with_winner("2025casj_qm1", "2025casj", "blue")
        .await?;
    let feed = feed(&test);

    let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, 4);
    let result = sync.get_matches_for_event("2025casj").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let stored = MatchRepository::new(&test.db)
        .get_by_key("2025casj_qm1")
        .await?
        .unwrap();
    assert_eq!(stored.winning_alliance, "blue");
    assert_eq!(stored.actual_time, Some(1742000300));

    test.assert_mocks();

    Ok(())
}

/// Tests that the result of a sync does not depend on the worker count.
///
/// Runs the same listing of twenty matches through orchestrators with 1, 4, and 20 workers,
/// each against its own database.
///
/// Expected: Twenty matches stored with two alliances each for every worker count
#[tokio::test]
async fn worker_count_does_not_change_result() -> Result<(), TestError> {
    let matches: Vec<_> = (1..=20)
        .map(|n| factory::mock_match(&format!("2025casj_qm{}", n), "2025casj"))
        .collect();

    for workers in [1, 4, 20] {
        let test = TestBuilder::new()
            .with_schema()
            .with_event_matches_endpoint("2025casj", matches.clone(), None, 1)
            .build()
            .await?;
        let feed = feed(&test);

        let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, workers);
        let result = sync.get_matches_for_event("2025casj").await;

        assert!(result.is_ok(), "workers {}: {:?}", workers, result);
        let stored = MatchRepository::new(&test.db)
            .get_by_event_key("2025casj")
            .await?;
        assert_eq!(stored.len(), 20, "workers {}", workers);
        let alliances = entity::prelude::Alliance::find().all(&test.db).await?;
        assert_eq!(alliances.len(), 40, "workers {}", workers);

        test.assert_mocks();
    }

    Ok(())
}

/// Tests that an unplayed feed match does not wipe stored scores.
///
/// Expected: Alliance score from the first, played listing kept after an unplayed one
#[tokio::test]
async fn unplayed_listing_keeps_scores() -> Result<(), TestError> {
    let played = factory::mock_match_with_alliances(
        "2025casj_qm1",
        "2025casj",
        "red",
        factory::mock_alliance(120, &["118", "254", "1678"]),
        factory::mock_alliance(85, &["971", "973", "604"]),
    );

    let test = TestBuilder::new()
        .with_schema()
        .with_mock_endpoint(move |server| {
            server
                .mock("GET", "/event/2025casj/matches")
                .match_header("if-modified-since", Matcher::Missing)
                .with_status(200)
                .with_header("last-modified", FIRST_TOKEN)
                .with_body(json!([played]).to_string())
                .expect(1)
                .create()
        })
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/event/2025casj/matches")
                .match_header("if-modified-since", FIRST_TOKEN)
                .with_status(200)
                .with_body(
                    json!([factory::mock_match("2025casj_qm1", "2025casj")]).to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let feed = feed(&test);

    let sync = SyncOrchestrator::new(&test.db, &feed, TEST_YEAR, 4);
    sync.get_matches_for_event("2025casj").await.unwrap();
    sync.get_matches_for_event("2025casj").await.unwrap();

    let stored = MatchRepository::new(&test.db)
        .get_by_key("2025casj_qm1")
        .await?
        .unwrap();
    assert_eq!(stored.winning_alliance, "red");

    let alliances = entity::prelude::Alliance::find().all(&test.db).await?;
    let mut scores: Vec<i32> = alliances.iter().map(|a| a.score).collect();
    scores.sort();
    assert_eq!(scores, vec![85, 120]);

    test.assert_mocks();

    Ok(())
}
