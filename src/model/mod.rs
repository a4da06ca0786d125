//! Data shapes crossing the core's boundary.
//!
//! `feed` holds the wire format read from the feed. The remaining modules hold the DTOs the
//! serving layer serializes for clients, converted from stored entity models.

pub mod alliance;
pub mod event;
pub mod event_match;
pub mod feed;
pub mod report;
