//! Error types for the scoutsync core.
//!
//! Domain errors (configuration, feed, report submission, synchronization) live in their own
//! modules and are aggregated by [`Error`] together with the library errors they wrap. HTTP
//! translation is left to the serving layer, which maps [`Error::kind`] onto status codes.

pub mod config;
pub mod feed;
pub mod report;
pub mod sync;

use thiserror::Error;

use crate::error::{config::ConfigError, feed::FeedError, report::ReportError, sync::SyncError};

/// Abstract error categories exposed to the serving layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced event, match, alliance, or report does not exist.
    NotFound,
    /// A report for the team already exists on the alliance.
    Conflict,
    /// The request references something malformed or impossible.
    BadRequest,
    /// The feed could not be reached or answered badly.
    Upstream,
    /// The relational store failed.
    Storage,
    /// Misconfiguration or an aggregate failure with no better category.
    Internal,
}

/// Main error type for the scoutsync core.
///
/// `thiserror`'s `#[from]` attribute lets every domain and library error convert through `?`.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Feed request, status, or decoding failure.
    #[error(transparent)]
    FeedError(#[from] FeedError),
    /// Report submission or update rejected.
    #[error(transparent)]
    ReportError(#[from] ReportError),
    /// A synchronization batch finished with failed items.
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl Error {
    /// Category of this error for translation into a user-visible status.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigError(_) => ErrorKind::Internal,
            Self::FeedError(FeedError::InvalidApiKey) => ErrorKind::Internal,
            Self::FeedError(_) => ErrorKind::Upstream,
            Self::ReportError(err) => err.kind(),
            Self::SyncError(_) => ErrorKind::Internal,
            Self::DbErr(_) => ErrorKind::Storage,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::FeedError(FeedError::from(err))
    }
}
