pub mod prelude;

pub mod alliance;
pub mod alliance_team;
pub mod event;
pub mod event_match;
pub mod modified_token;
pub mod report;
