//! Tests for MatchRepository.

use super::*;

fn feed_match(key: &str, event_key: &str) -> Result<FeedMatch, TestError> {
    Ok(serde_json::from_value(factory::mock_match(key, event_key))?)
}

/// Expect a new match to be stored with an empty winner
#[tokio::test]
async fn upserts_new_match() -> Result<(), TestError> {
    let test = TestBuilder::new().with_schema().build().await?;

    let repo = MatchRepository::new(&test.db);
    let stored = repo.upsert(&feed_match("2025casj_qm1", "2025casj")?).await?;

    assert_eq!(stored.key, "2025casj_qm1");
    assert_eq!(stored.event_key, "2025casj");
    assert_eq!(stored.predicted_time, Some(1742000000));
    assert_eq!(stored.actual_time, None);
    assert_eq!(stored.winning_alliance, "");

    Ok(())
}

/// Expect an empty winner and missing actual time from the feed to keep the stored values
#[tokio::test]
async fn empty_fields_keep_stored_values() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_schema().build().await?;
    test.store()
        .insert_mock_match_with_winner("2025casj_qm1", "2025casj", "blue")
        .await?;

    let mut incoming = feed_match("2025casj_qm1", "2025casj")?;
    incoming.winning_alliance = Some(String::new());
    incoming.predicted_time = None;
    incoming.actual_time = None;

    let repo = MatchRepository::new(&test.db);
    let stored = repo.upsert(&incoming).await?;

    assert_eq!(stored.winning_alliance, "blue");
    assert_eq!(stored.predicted_time, Some(1742000000));
    assert_eq!(stored.actual_time, Some(1742000300));

    Ok(())
}

/// Expect non-empty feed fields to overwrite the stored values
#[tokio::test]
async fn present_fields_overwrite() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_schema().build().await?;
    test.store()
        .insert_mock_match_with_winner("2025casj_qm1", "2025casj", "blue")
        .await?;

    let mut incoming = feed_match("2025casj_qm1", "2025casj")?;
    incoming.winning_alliance = Some("red".to_string());
    incoming.actual_time = Some(1742000900);

    let repo = MatchRepository::new(&test.db);
    let stored = repo.upsert(&incoming).await?;

    assert_eq!(stored.winning_alliance, "red");
    assert_eq!(stored.actual_time, Some(1742000900));

    Ok(())
}

/// Expect only matches of the requested event, in schedule order
#[tokio::test]
async fn get_by_event_key_filters_event() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm2", "2025casj")
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_match("2025cafr_qm1", "2025cafr")
        .build()
        .await?;

    let repo = MatchRepository::new(&test.db);
    let matches = repo.get_by_event_key("2025casj").await?;

    let keys: Vec<&str> = matches.iter().map(|m| m.key.as_str()).collect();
    assert_eq!(keys, vec!["2025casj_qm1", "2025casj_qm2"]);

    Ok(())
}
