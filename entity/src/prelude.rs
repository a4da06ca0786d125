pub use super::alliance::Entity as Alliance;
pub use super::alliance_team::Entity as AllianceTeam;
pub use super::event::Entity as Event;
pub use super::event_match::Entity as EventMatch;
pub use super::modified_token::Entity as ModifiedToken;
pub use super::report::Entity as Report;
