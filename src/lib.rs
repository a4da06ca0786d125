//! Competition schedule synchronization and alliance scouting reports.
//!
//! The crate keeps a relational copy of a competition feed's events and matches current through
//! conditional requests, and reconciles scouting reports submitted per team into alliances of at
//! most three teams.
//!
//! - [`feed`]: conditional-GET client for the feed
//! - [`data`]: repositories over the `entity` crate's tables
//! - [`service`]: the sync flows, the bulk upsert engine, and the report coordinator
//! - [`model`]: feed wire types and the DTOs handed to callers
//! - [`error`]: error types with an abstract [`error::ErrorKind`] for the serving layer

pub mod config;
pub mod data;
pub mod error;
pub mod feed;
pub mod model;
pub mod service;
pub mod startup;
