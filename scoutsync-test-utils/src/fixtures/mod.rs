//! Test fixture modules for database rows and mock feed endpoints.
//!
//! - `feed` - JSON bodies shaped like feed responses and the mockito endpoints serving them
//! - `store` - rows inserted directly into the test database

pub mod feed;
pub mod store;
