//! Declarative test builder for Phase 1 setup.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// stored fixtures, and mock feed endpoints. Methods can be chained together and
/// finalized with `build()`.
pub struct TestBuilder {
    // Schema to create
    include_schema: bool,
    tables: Vec<TableCreateStatement>,

    // Database fixtures to insert
    events: Vec<String>,
    matches: Vec<(String, String)>, // (match_key, event_key)
    alliances: Vec<(String, bool, i32, Vec<String>)>, // (match_key, is_blue, score, teams)
    tokens: Vec<(String, String)>,  // (resource, token)

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    events_endpoints: Vec<(i32, Vec<Value>, Option<String>, usize)>,
    matches_endpoints: Vec<(String, Vec<Value>, Option<String>, usize)>,
    not_modified_endpoints: Vec<(String, String, usize)>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no schema, fixtures, or endpoints configured.
    pub fn new() -> Self {
        Self {
            include_schema: false,
            tables: Vec::new(),
            events: Vec::new(),
            matches: Vec::new(),
            alliances: Vec::new(),
            tokens: Vec::new(),
            mock_builders: Vec::new(),
            events_endpoints: Vec::new(),
            matches_endpoints: Vec::new(),
            not_modified_endpoints: Vec::new(),
        }
    }

    /// Run the workspace migrations against the test database.
    ///
    /// This is the only way to get the composite unique indexes the upserts rely on;
    /// `with_table` creates bare tables from entity definitions.
    pub fn with_schema(mut self) -> Self {
        self.include_schema = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scoutsync_test_utils::TestBuilder;
    ///
    /// # async fn example() -> Result<(), scoutsync_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(entity::prelude::Event)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a mock event into the database.
    pub fn with_mock_event(mut self, key: &str) -> Self {
        self.events.push(key.to_string());
        self
    }

    /// Insert a mock unplayed match into the database.
    pub fn with_mock_match(mut self, key: &str, event_key: &str) -> Self {
        self.matches.push((key.to_string(), event_key.to_string()));
        self
    }

    /// Insert a mock alliance with the given team slots into the database.
    ///
    /// The referenced match must be queued with `with_mock_match` first.
    pub fn with_mock_alliance(
        mut self,
        match_key: &str,
        is_blue: bool,
        score: i32,
        teams: &[&str],
    ) -> Self {
        self.alliances.push((
            match_key.to_string(),
            is_blue,
            score,
            teams.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    /// Store a last-modified token for `resource`.
    pub fn with_token(mut self, resource: &str, token: &str) -> Self {
        self.tokens.push((resource.to_string(), token.to_string()));
        self
    }

    /// Serve `events` from `GET /events/{year}`.
    pub fn with_events_endpoint(
        mut self,
        year: i32,
        events: Vec<Value>,
        last_modified: Option<&str>,
        expected_requests: usize,
    ) -> Self {
        self.events_endpoints.push((
            year,
            events,
            last_modified.map(str::to_string),
            expected_requests,
        ));
        self
    }

    /// Serve `matches` from `GET /event/{event_key}/matches`.
    pub fn with_event_matches_endpoint(
        mut self,
        event_key: &str,
        matches: Vec<Value>,
        last_modified: Option<&str>,
        expected_requests: usize,
    ) -> Self {
        self.matches_endpoints.push((
            event_key.to_string(),
            matches,
            last_modified.map(str::to_string),
            expected_requests,
        ));
        self
    }

    /// Answer `304 Not Modified` on `path` when the request carries `token`.
    pub fn with_not_modified_endpoint(
        mut self,
        path: &str,
        token: &str,
        expected_requests: usize,
    ) -> Self {
        self.not_modified_endpoints
            .push((path.to_string(), token.to_string(), expected_requests));
        self
    }

    /// Register a custom mock endpoint.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context, executing every queued operation in order:
    /// schema, tables, fixtures, then endpoints.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create schema
        if self.include_schema {
            setup.with_schema().await?;
        }
        setup.with_tables(self.tables).await?;

        // 2. Insert database fixtures
        for key in self.events {
            setup.store().insert_mock_event(&key).await?;
        }

        for (key, event_key) in self.matches {
            setup.store().insert_mock_match(&key, &event_key).await?;
        }

        for (match_key, is_blue, score, teams) in self.alliances {
            let teams: Vec<&str> = teams.iter().map(String::as_str).collect();
            setup
                .store()
                .insert_mock_alliance(&match_key, is_blue, score, &teams)
                .await?;
        }

        for (resource, token) in self.tokens {
            setup.store().insert_mock_token(&resource, &token).await?;
        }

        // 3. Create mock endpoints
        for (year, events, last_modified, expected) in self.events_endpoints {
            let mock = setup.feed().create_events_endpoint(
                year,
                events,
                last_modified.as_deref(),
                expected,
            );
            setup.mocks.push(mock);
        }

        for (event_key, matches, last_modified, expected) in self.matches_endpoints {
            let mock = setup.feed().create_event_matches_endpoint(
                &event_key,
                matches,
                last_modified.as_deref(),
                expected,
            );
            setup.mocks.push(mock);
        }

        for (path, token, expected) in self.not_modified_endpoints {
            let mock = setup
                .feed()
                .create_not_modified_endpoint(&path, &token, expected);
            setup.mocks.push(mock);
        }

        for builder in self.mock_builders {
            let mock = builder(&mut setup.server);
            setup.mocks.push(mock);
        }

        Ok(setup)
    }
}
