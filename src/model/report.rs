use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-phase statistics of a report.
///
/// The fields inside each phase are validated against the game schema by the analysis
/// collaborator before reaching the core; here they are stored and returned untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    #[serde(default)]
    pub auto: Map<String, Value>,
    #[serde(default)]
    pub teleop: Map<String, Value>,
}

/// One team's performance record for one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDto {
    /// Empty for anonymous reports.
    #[serde(default)]
    pub reporter: String,
    pub team: String,
    pub score: i32,
    #[serde(default)]
    pub stats: ReportStats,
}

/// Every report of a match, split by alliance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReportsDto {
    pub red: Vec<ReportDto>,
    pub blue: Vec<ReportDto>,
}

impl From<entity::report::Model> for ReportDto {
    fn from(model: entity::report::Model) -> Self {
        Self {
            reporter: model.reporter,
            team: model.team_number,
            score: model.score,
            stats: ReportStats {
                auto: into_object(model.auto_stats),
                teleop: into_object(model.teleop_stats),
            },
        }
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
