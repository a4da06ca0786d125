//! Wire format of the feed's event and match listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix the feed puts in front of team numbers in team keys.
static TEAM_KEY_PREFIX: &str = "frc";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub start_date: NaiveDate,
    pub year: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMatch {
    pub key: String,
    pub event_key: String,
    #[serde(default)]
    pub predicted_time: Option<i64>,
    #[serde(default)]
    pub actual_time: Option<i64>,
    #[serde(default)]
    pub winning_alliance: Option<String>,
    #[serde(default)]
    pub alliances: Option<FeedAlliances>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAlliances {
    pub red: FeedAlliance,
    pub blue: FeedAlliance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAlliance {
    /// Negative until the match has been played.
    pub score: i32,
    #[serde(default)]
    pub team_keys: Vec<String>,
}

impl FeedAlliance {
    /// Whether the feed has a final score for this alliance.
    pub fn has_score(&self) -> bool {
        self.score >= 0
    }

    /// Team numbers with the feed's team key prefix removed, duplicates dropped.
    pub fn team_numbers(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::with_capacity(self.team_keys.len());

        for key in &self.team_keys {
            let team = key.strip_prefix(TEAM_KEY_PREFIX).unwrap_or(key).to_string();
            if !team.is_empty() && !teams.contains(&team) {
                teams.push(team);
            }
        }

        teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect prefixes stripped and alphanumeric designators kept
    #[test]
    fn team_numbers_strip_prefix() {
        let alliance = FeedAlliance {
            score: 10,
            team_keys: vec!["frc118".into(), "frc254B".into(), "frc118".into()],
        };

        assert_eq!(alliance.team_numbers(), vec!["118", "254B"]);
    }

    /// Expect a feed match without optional fields to deserialize with empty defaults
    #[test]
    fn match_without_optional_fields() {
        let body = r#"{"key":"2025casj_qm1","event_key":"2025casj"}"#;
        let parsed: FeedMatch = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.winning_alliance, None);
        assert_eq!(parsed.predicted_time, None);
        assert!(parsed.alliances.is_none());
    }

    /// Expect a negative score to read as unplayed
    #[test]
    fn negative_score_has_no_score() {
        let alliance = FeedAlliance {
            score: -1,
            team_keys: Vec::new(),
        };

        assert!(!alliance.has_score());
    }
}
