use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Connection, timeout, or transport failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// Any non-success status other than `304 Not Modified`.
    #[error("Feed responded with unexpected status {0}")]
    BadStatus(u16),
    #[error("Feed response exceeded the {limit} byte limit")]
    ResponseTooLarge { limit: usize },
    #[error("Feed API key is not a valid header value")]
    InvalidApiKey,
    #[error("Failed to decode feed response: {0}")]
    Decode(#[from] serde_json::Error),
}
