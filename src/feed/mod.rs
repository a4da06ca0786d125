//! Conditional-GET client for the competition feed.
//!
//! Every listing on the feed carries a `Last-Modified` header. The client hands that value back
//! as an opaque token and replays it as `If-Modified-Since` on the next request, so an unchanged
//! listing costs a `304 Not Modified` without a body.

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, IF_MODIFIED_SINCE, LAST_MODIFIED},
    StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::feed::FeedError,
    model::feed::{FeedEvent, FeedMatch},
};

/// Header carrying the feed API key.
pub const FEED_AUTH_HEADER: HeaderName = HeaderName::from_static("x-tba-auth-key");

/// Upper bound on a response body.
pub const MAX_RESPONSE_BYTES: usize = 1 << 20;

/// Outcome of a conditional fetch.
#[derive(Debug, PartialEq)]
pub enum FeedResponse<T> {
    /// The resource has not changed since the cached token.
    Unmodified,
    /// Fresh records with the token to send on the next request, if the feed returned one.
    Modified {
        records: T,
        token: Option<String>,
    },
}

#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Build a client for the feed at `base_url` authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &str, user_agent: &str) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(api_key).map_err(|_| FeedError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(FEED_AUTH_HEADER, auth);

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch `path` relative to the base URL, replaying `token` as `If-Modified-Since`
    ///
    /// # Arguments
    /// - `path`: Resource path without a leading slash, e.g. `events/2025`
    /// - `token`: Last-modified token from the previous successful fetch of this resource
    ///
    /// # Returns
    /// - [`FeedResponse::Unmodified`]: The feed answered `304 Not Modified`; no body is read
    /// - [`FeedResponse::Modified`]: Parsed body and the response's `Last-Modified` value
    /// - [`FeedError`]: Transport failure, unexpected status, oversized or malformed body
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<FeedResponse<T>, FeedError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.http.get(&url);
        if let Some(token) = token {
            request = request.header(IF_MODIFIED_SINCE, token);
        }

        let mut response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!(path, "Feed resource not modified");
            return Ok(FeedResponse::Unmodified);
        }
        if !status.is_success() {
            return Err(FeedError::BadStatus(status.as_u16()));
        }

        let new_token = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if response
            .content_length()
            .is_some_and(|len| len > MAX_RESPONSE_BYTES as u64)
        {
            return Err(FeedError::ResponseTooLarge {
                limit: MAX_RESPONSE_BYTES,
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
                return Err(FeedError::ResponseTooLarge {
                    limit: MAX_RESPONSE_BYTES,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let records = serde_json::from_slice(&body)?;
        debug!(path, bytes = body.len(), "Fetched feed resource");

        Ok(FeedResponse::Modified {
            records,
            token: new_token,
        })
    }

    /// Fetch every event of a season
    pub async fn events(
        &self,
        year: i32,
        token: Option<&str>,
    ) -> Result<FeedResponse<Vec<FeedEvent>>, FeedError> {
        self.fetch(&format!("events/{}", year), token).await
    }

    /// Fetch every match of an event, including both alliances
    pub async fn event_matches(
        &self,
        event_key: &str,
        token: Option<&str>,
    ) -> Result<FeedResponse<Vec<FeedMatch>>, FeedError> {
        self.fetch(&format!("event/{}/matches", event_key), token)
            .await
    }
}
