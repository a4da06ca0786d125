//! End-to-end tests for ReportService.
//!
//! This module drives report submission and update through their full sequences against a
//! migrated database: alliance creation, slot filling up to the three-team cap, duplicate
//! detection, and the score behavior of submissions versus updates.

use scoutsync::{
    error::{report::ReportError, Error, ErrorKind},
    model::{
        alliance::AllianceColor,
        report::{ReportDto, ReportStats},
    },
    service::ReportService,
};
use scoutsync_test_utils::prelude::*;
use serde_json::json;

static MATCH_KEY: &str = "2025casj_qm1";

fn report(team: &str, score: i32) -> ReportDto {
    let mut stats = ReportStats::default();
    stats.auto.insert("coral_l1".to_string(), json!(1));
    stats.teleop.insert("coral_l4".to_string(), json!(score / 5));

    ReportDto {
        reporter: String::new(),
        team: team.to_string(),
        score,
        stats,
    }
}

fn kind(result: &Result<ReportDto, Error>) -> Option<ErrorKind> {
    result.as_ref().err().map(Error::kind)
}

/// Tests the red alliance lifecycle across three teams.
///
/// Submits a report for team 118, resubmits it, then submits a report for team 254. The
/// first submission creates the alliance at the report's score, the resubmission is a
/// conflict that leaves everything in place, and the third submission adds a second slot
/// and replaces the alliance score.
///
/// Expected: Alliance with slots [118, 254] and score 55
#[tokio::test]
async fn red_alliance_sequence() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match(MATCH_KEY, "2025casj")
        .build()
        .await?;

    let service = ReportService::new(&test.db);

    let first = service
        .submit_report(MATCH_KEY, "118", AllianceColor::Red, report("118", 40))
        .await;
    assert!(first.is_ok(), "Error: {:?}", first);

    let alliances = service.get_alliances(MATCH_KEY).await.unwrap();
    assert_eq!(alliances[0].score, 40);
    assert_eq!(alliances[0].teams.len(), 1);

    let again = service
        .submit_report(MATCH_KEY, "118", AllianceColor::Red, report("118", 40))
        .await;
    assert_eq!(kind(&again), Some(ErrorKind::Conflict));

    let second = service
        .submit_report(MATCH_KEY, "254", AllianceColor::Red, report("254", 55))
        .await;
    assert!(second.is_ok(), "Error: {:?}", second);

    let alliances = service.get_alliances(MATCH_KEY).await.unwrap();
    assert_eq!(alliances.len(), 1);
    let teams: Vec<&str> = alliances[0].teams.iter().map(|t| t.team.as_str()).collect();
    assert_eq!(teams, vec!["118", "254"]);
    assert_eq!(alliances[0].score, 55);

    Ok(())
}

/// Tests that an alliance never grows beyond three teams.
///
/// Submits reports for five distinct teams on the same side of a match and checks the slot
/// count after every attempt.
///
/// Expected: Three submissions accepted, two rejected as full, three slots stored
#[tokio::test]
async fn alliance_caps_at_three_teams() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match(MATCH_KEY, "2025casj")
        .build()
        .await?;

    let service = ReportService::new(&test.db);
    let mut accepted = 0;

    for team in ["971", "973", "604", "5940", "1678"] {
        let result = service
            .submit_report(MATCH_KEY, team, AllianceColor::Blue, report(team, 30))
            .await;

        match result {
            Ok(_) => accepted += 1,
            Err(Error::ReportError(ReportError::AllianceFull { .. })) => {}
            Err(e) => panic!("Unexpected error: {:?}", e),
        }

        let alliances = service.get_alliances(MATCH_KEY).await.unwrap();
        assert!(alliances[0].teams.len() <= 3);
    }

    assert_eq!(accepted, 3);

    Ok(())
}

/// Tests concurrent submissions for the same side of a match.
///
/// Fires six submissions at once for distinct teams of a match with no alliance yet. Whatever
/// order they are serialized in, the unique indexes keep one alliance with at most three slots.
///
/// Expected: One alliance with at most three teams; every failure is a conflict or full alliance
#[tokio::test]
async fn concurrent_submissions_stay_consistent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match(MATCH_KEY, "2025casj")
        .build()
        .await?;

    let service = ReportService::new(&test.db);
    let teams = ["118", "254", "1678", "971", "973", "604"];

    let results = futures::future::join_all(teams.iter().map(|team| {
        service.submit_report(MATCH_KEY, team, AllianceColor::Red, report(team, 10))
    }))
    .await;

    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e.kind(), ErrorKind::Conflict | ErrorKind::BadRequest),
                "Unexpected error: {:?}",
                e
            );
        }
    }

    let alliances = service.get_alliances(MATCH_KEY).await.unwrap();
    assert_eq!(alliances.len(), 1);
    assert!(alliances[0].teams.len() <= 3);
    let stored = service.get_reports_for_match(MATCH_KEY).await.unwrap();
    assert_eq!(stored.red.len(), alliances[0].teams.len());

    Ok(())
}

/// Tests updating a report on a side with no alliance.
///
/// Expected: Err with NotFound kind
#[tokio::test]
async fn update_without_alliance_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match(MATCH_KEY, "2025casj")
        .build()
        .await?;

    let service = ReportService::new(&test.db);
    service
        .submit_report(MATCH_KEY, "118", AllianceColor::Red, report("118", 40))
        .await
        .unwrap();

    let result = service
        .update_report(MATCH_KEY, "971", AllianceColor::Blue, report("971", 20))
        .await;

    assert_eq!(kind(&result), Some(ErrorKind::NotFound));

    Ok(())
}

/// Tests that updating a report does not touch the alliance score.
///
/// Submission replaces the alliance score with the report's score, update does not. This
/// pins the difference so it cannot change silently.
///
/// Expected: Report score 90, alliance score still 40
#[tokio::test]
async fn update_keeps_alliance_score() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_schema()
        .with_mock_match(MATCH_KEY, "2025casj")
        .build()
        .await?;

    let service = ReportService::new(&test.db);
    service
        .submit_report(MATCH_KEY, "118", AllianceColor::Red, report("118", 40))
        .await
        .unwrap();

    let updated = service
        .update_report(MATCH_KEY, "118", AllianceColor::Red, report("118", 90))
        .await;
    assert!(updated.is_ok(), "Error: {:?}", updated);

    let stored = service
        .get_report(MATCH_KEY, "118", AllianceColor::Red)
        .await
        .unwrap();
    assert_eq!(stored.score, 90);
    assert_eq!(stored.stats.teleop.get("coral_l4"), Some(&json!(18)));

    let alliances = service.get_alliances(MATCH_KEY).await.unwrap();
    assert_eq!(alliances[0].score, 40);

    Ok(())
}
