//! Feed HTTP mock endpoint creation utilities.
//!
//! Every endpoint requires the test API key header so a client that forgets to authenticate
//! never matches. Builder shortcuts hand their mocks to the context for `assert_mocks`.

use mockito::Mock;
use serde_json::Value;

use crate::{constant::TEST_FEED_API_KEY, fixtures::feed::FeedFixtures};

pub static FEED_AUTH_HEADER: &str = "X-TBA-Auth-Key";

impl<'a> FeedFixtures<'a> {
    /// Create a `GET /events/{year}` endpoint returning `events`.
    ///
    /// # Arguments
    /// - `year` - Season in the request path
    /// - `events` - Feed event objects to return
    /// - `last_modified` - Optional `Last-Modified` header sent back to the client
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_events_endpoint(
        &mut self,
        year: i32,
        events: Vec<Value>,
        last_modified: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/events/{}", year);
        self.create_json_endpoint(&path, Value::Array(events), last_modified, expected_requests)
    }

    /// Create a `GET /event/{event_key}/matches` endpoint returning `matches`.
    pub fn create_event_matches_endpoint(
        &mut self,
        event_key: &str,
        matches: Vec<Value>,
        last_modified: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/event/{}/matches", event_key);
        self.create_json_endpoint(&path, Value::Array(matches), last_modified, expected_requests)
    }

    /// Create an endpoint answering `304 Not Modified` to requests carrying `token` as
    /// `If-Modified-Since`.
    pub fn create_not_modified_endpoint(
        &mut self,
        path: &str,
        token: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .match_header(FEED_AUTH_HEADER, TEST_FEED_API_KEY)
            .match_header("if-modified-since", token)
            .with_status(304)
            .expect(expected_requests)
            .create()
    }

    /// Create an endpoint answering with `status` and an empty body.
    pub fn create_status_endpoint(
        &mut self,
        path: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .match_header(FEED_AUTH_HEADER, TEST_FEED_API_KEY)
            .with_status(status)
            .expect(expected_requests)
            .create()
    }

    /// Create an endpoint answering `200 OK` with an arbitrary raw body.
    pub fn create_raw_endpoint(
        &mut self,
        path: &str,
        body: Vec<u8>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .match_header(FEED_AUTH_HEADER, TEST_FEED_API_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }

    fn create_json_endpoint(
        &mut self,
        path: &str,
        body: Value,
        last_modified: Option<&str>,
        expected_requests: usize,
    ) -> Mock {
        let mut builder = self
            .setup
            .server
            .mock("GET", path)
            .match_header(FEED_AUTH_HEADER, TEST_FEED_API_KEY)
            .with_status(200)
            .with_header("content-type", "application/json");

        if let Some(last_modified) = last_modified {
            builder = builder.with_header("last-modified", last_modified);
        }

        builder
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
