//! Shared test harness for the scoutsync workspace.
//!
//! Tests are written in two phases. Phase 1 declares the environment through
//! [`TestBuilder`]: schema, stored fixtures, and mock feed endpoints. Phase 2 runs against the
//! resulting [`TestContext`], which owns an in-memory SQLite database and a mockito server
//! standing in for the feed.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_FEED_API_KEY, TEST_USER_AGENT, TEST_YEAR},
        fixtures::feed::factory,
        TestBuilder, TestContext, TestError,
    };
}
