use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of teams on one alliance.
pub const MAX_ALLIANCE_TEAMS: usize = 3;

/// Side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllianceColor {
    Red,
    Blue,
}

impl AllianceColor {
    pub fn is_blue(self) -> bool {
        matches!(self, Self::Blue)
    }

    pub fn from_is_blue(is_blue: bool) -> Self {
        if is_blue {
            Self::Blue
        } else {
            Self::Red
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for AllianceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSlotDto {
    pub team: String,
    pub predicted_contribution: Option<Value>,
    pub actual_contribution: Option<Value>,
}

impl From<entity::alliance_team::Model> for TeamSlotDto {
    fn from(model: entity::alliance_team::Model) -> Self {
        Self {
            team: model.team_number,
            predicted_contribution: model.predicted_contribution,
            actual_contribution: model.actual_contribution,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllianceDto {
    pub id: i32,
    pub match_key: String,
    pub is_blue: bool,
    pub score: i32,
    /// Team slots in the order they were filled.
    pub teams: Vec<TeamSlotDto>,
}

impl AllianceDto {
    pub fn from_models(
        alliance: entity::alliance::Model,
        teams: Vec<entity::alliance_team::Model>,
    ) -> Self {
        Self {
            id: alliance.id,
            match_key: alliance.match_key,
            is_blue: alliance.is_blue,
            score: alliance.score,
            teams: teams.into_iter().map(TeamSlotDto::from).collect(),
        }
    }
}
