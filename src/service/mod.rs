//! Services composing the feed client and repositories into the sync and report flows.

pub mod bulk;
pub mod report;
pub mod sync;

pub use bulk::BulkUpsertEngine;
pub use report::ReportService;
pub use sync::SyncOrchestrator;

#[cfg(test)]
mod tests;
