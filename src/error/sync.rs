use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to store {key:?}: {source}")]
    ItemFailed {
        key: String,
        #[source]
        source: sea_orm::DbErr,
    },
    // Individual failures are logged where they happen; only the tally crosses the boundary.
    #[error("Failed to store {failed} of {total} {resource} fetched from the feed")]
    BatchFailed {
        resource: String,
        failed: usize,
        total: usize,
    },
}
