//! Data access layer repositories.
//!
//! Each repository wraps one table and is generic over [`sea_orm::ConnectionTrait`] so the same
//! code runs against a pooled connection or inside a transaction. Repositories return
//! [`sea_orm::DbErr`] and leave business rules to the service layer.

pub mod alliance;
pub mod alliance_team;
pub mod event;
pub mod event_match;
pub mod modified_token;
pub mod report;

pub use alliance::AllianceRepository;
pub use alliance_team::AllianceTeamRepository;
pub use event::EventRepository;
pub use event_match::MatchRepository;
pub use modified_token::ModifiedTokenRepository;
pub use report::ReportRepository;

#[cfg(test)]
mod tests;
