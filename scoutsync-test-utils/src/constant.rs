//! Placeholder values used when pointing a feed client at the mock server.

/// User agent sent by test feed clients.
pub static TEST_USER_AGENT: &str = "scoutsync-tests/1.0 (contact@example.com)";

/// Feed API key expected by the mock endpoints. Not a real credential.
pub static TEST_FEED_API_KEY: &str = "feed_api_key";

/// Season used by event fixtures and the events endpoint.
pub static TEST_YEAR: i32 = 2025;
