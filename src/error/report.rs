use thiserror::Error;

use crate::{error::ErrorKind, model::alliance::AllianceColor};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("Match {0:?} does not exist")]
    UnknownMatch(String),
    #[error("The {color} alliance of match {match_key:?} already has three teams")]
    AllianceFull {
        match_key: String,
        color: AllianceColor,
    },
    #[error("Team {path:?} in the request does not match team {payload:?} in the report")]
    TeamMismatch { path: String, payload: String },
    #[error("A report for team {team_number:?} on the {color} alliance of match {match_key:?} already exists")]
    DuplicateReport {
        match_key: String,
        team_number: String,
        color: AllianceColor,
    },
    #[error("The {color} alliance of match {match_key:?} was created by a concurrent submission, please retry")]
    ConcurrentAllianceCreation {
        match_key: String,
        color: AllianceColor,
    },
    #[error("Match {match_key:?} has no {color} alliance")]
    AllianceNotFound {
        match_key: String,
        color: AllianceColor,
    },
    #[error("Team {team_number:?} is not on the {color} alliance of match {match_key:?}")]
    TeamNotOnAlliance {
        match_key: String,
        team_number: String,
        color: AllianceColor,
    },
    #[error("No report for team {team_number:?} on the {color} alliance of match {match_key:?}")]
    ReportNotFound {
        match_key: String,
        team_number: String,
        color: AllianceColor,
    },
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownMatch(_) | Self::AllianceFull { .. } | Self::TeamMismatch { .. } => {
                ErrorKind::BadRequest
            }
            Self::DuplicateReport { .. } | Self::ConcurrentAllianceCreation { .. } => {
                ErrorKind::Conflict
            }
            Self::AllianceNotFound { .. }
            | Self::TeamNotOnAlliance { .. }
            | Self::ReportNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
