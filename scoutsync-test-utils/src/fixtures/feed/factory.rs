//! Feed response bodies with default test values.

use serde_json::{json, Value};

use crate::constant::TEST_YEAR;

/// Create a feed event object.
///
/// # Arguments
/// - `key` - Event key, e.g. `"2025casj"`
pub fn mock_event(key: &str) -> Value {
    json!({
        "key": key,
        "name": format!("{} Regional", key),
        "start_date": format!("{}-03-14", TEST_YEAR),
        "year": TEST_YEAR,
    })
}

/// Create a feed alliance object from bare team numbers.
///
/// Team numbers are prefixed with `frc` the way the feed reports team keys.
pub fn mock_alliance(score: i32, teams: &[&str]) -> Value {
    let team_keys: Vec<String> = teams.iter().map(|team| format!("frc{}", team)).collect();

    json!({
        "score": score,
        "team_keys": team_keys,
    })
}

/// Create an unplayed feed match with three teams on each alliance.
///
/// # Arguments
/// - `key` - Match key, e.g. `"2025casj_qm1"`
/// - `event_key` - Key of the event the match belongs to
pub fn mock_match(key: &str, event_key: &str) -> Value {
    mock_match_with_alliances(
        key,
        event_key,
        "",
        mock_alliance(-1, &["118", "254", "1678"]),
        mock_alliance(-1, &["971", "973", "604"]),
    )
}

/// Create a feed match with explicit alliances and winner.
pub fn mock_match_with_alliances(
    key: &str,
    event_key: &str,
    winning_alliance: &str,
    red: Value,
    blue: Value,
) -> Value {
    json!({
        "key": key,
        "event_key": event_key,
        "predicted_time": 1742000000,
        "actual_time": null,
        "winning_alliance": winning_alliance,
        "alliances": {
            "red": red,
            "blue": blue,
        },
    })
}
