use std::{fmt::Display, future::Future};

use futures::{stream, StreamExt};
use tracing::warn;

/// Applies an upsert to every item of a batch with bounded concurrency.
///
/// Items are drained from one queue by at most `worker_count` in-flight upserts. Each item is
/// attempted exactly once and a failure never stops the others, so the upsert passed in must be
/// idempotent.
#[derive(Clone, Copy, Debug)]
pub struct BulkUpsertEngine {
    worker_count: usize,
}

impl BulkUpsertEngine {
    /// Creates a new instance of [`BulkUpsertEngine`], clamping a worker count of 0 to 1
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
        }
    }

    /// Run `upsert` on every item and collect the failures
    ///
    /// # Returns
    /// Errors in the order the failing upserts completed; empty if every item succeeded.
    pub async fn upsert_all<T, F, Fut, E>(&self, items: Vec<T>, upsert: F) -> Vec<E>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        stream::iter(items)
            .map(upsert)
            .buffer_unordered(self.worker_count)
            .filter_map(|result| async move {
                let err = result.err()?;
                warn!(error = %err, "Bulk upsert item failed");
                Some(err)
            })
            .collect()
            .await
    }
}
