//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder` for Phase 2 test execution.
//! The context includes an in-memory SQLite database and a mock feed server.

use migration::{Migrator, MigratorTrait};
use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let mut test = TestBuilder::new().with_schema().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Point a feed client at the mock server
/// let url = test.feed_url();
///
/// // Insert rows or register endpoints after build
/// test.store().insert_mock_match("2025casj_qm1", "2025casj").await?;
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Mock HTTP server standing in for the feed
    pub server: ServerGuard,

    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with an empty database and an idle mock server.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Run every migration, creating the full schema including composite unique indexes.
    pub(crate) async fn with_schema(&self) -> Result<(), TestError> {
        Migrator::up(&self.db, None).await?;

        Ok(())
    }

    /// Create individual tables from entity definitions.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock feed server.
    pub fn feed_url(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
