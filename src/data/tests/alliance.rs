//! Tests for AllianceRepository.

use super::*;

fn feed_alliance(score: i32) -> FeedAlliance {
    FeedAlliance {
        score,
        team_keys: vec!["frc118".to_string()],
    }
}

/// Expect a created alliance to be found by match key and side
#[tokio::test]
async fn creates_and_gets_alliance() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let created = repo.create("2025casj_qm1", true, 42).await?;
    let found = repo.get("2025casj_qm1", true).await?;

    assert_eq!(found, Some(created));
    assert!(repo.get("2025casj_qm1", false).await?.is_none());

    Ok(())
}

/// Expect a second alliance for the same side to violate the unique index
#[tokio::test]
async fn create_duplicate_side_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_alliance("2025casj_qm1", false, 0, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let result = repo.create("2025casj_qm1", false, 10).await;

    let err = result.expect_err("duplicate side was accepted");
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Expect the locking read to behave like a plain read on SQLite
#[tokio::test]
async fn get_for_update_reads_row() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_alliance("2025casj_qm1", false, 7, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let alliance = repo.get_for_update("2025casj_qm1", false).await?;

    assert_eq!(alliance.map(|a| a.score), Some(7));

    Ok(())
}

/// Expect both sides of a match, red first
#[tokio::test]
async fn get_by_match_key_orders_red_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_alliance("2025casj_qm1", true, 0, &[])
        .with_mock_alliance("2025casj_qm1", false, 0, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let alliances = repo.get_by_match_key("2025casj_qm1").await?;

    let sides: Vec<bool> = alliances.iter().map(|a| a.is_blue).collect();
    assert_eq!(sides, vec![false, true]);

    Ok(())
}

/// Expect update_score to overwrite the stored score
#[tokio::test]
async fn updates_score() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_alliance("2025casj_qm1", false, 7, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let alliance = repo
        .get("2025casj_qm1", false)
        .await?
        .expect("alliance fixture missing");
    let updated = repo.update_score(alliance, 55).await?;

    assert_eq!(updated.score, 55);

    Ok(())
}

/// Expect an unplayed feed score to insert as 0 and never replace a stored score
#[tokio::test]
async fn feed_negative_score_preserves_stored() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_match("2025casj_qm2", "2025casj")
        .with_mock_alliance("2025casj_qm1", false, 88, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let kept = repo
        .upsert_from_feed("2025casj_qm1", false, &feed_alliance(-1))
        .await?;
    let inserted = repo
        .upsert_from_feed("2025casj_qm2", false, &feed_alliance(-1))
        .await?;

    assert_eq!(kept.score, 88);
    assert_eq!(inserted.score, 0);

    Ok(())
}

/// Expect a played feed score to overwrite the stored score
#[tokio::test]
async fn feed_score_overwrites_stored() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match("2025casj_qm1", "2025casj")
        .with_mock_alliance("2025casj_qm1", true, 88, &[])
        .build()
        .await?;

    let repo = AllianceRepository::new(&test.db);
    let stored = repo
        .upsert_from_feed("2025casj_qm1", true, &feed_alliance(102))
        .await?;

    assert_eq!(stored.score, 102);

    Ok(())
}
