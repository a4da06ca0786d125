use chrono::{Datelike, Utc};

use crate::error::config::ConfigError;

static DEFAULT_FEED_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";
static DEFAULT_USER_AGENT: &str = concat!(
    "scoutsync/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/autumn-order/scoutsync)"
);
const DEFAULT_SYNC_WORKERS: usize = 4;

pub struct Config {
    pub database_url: String,
    pub feed_base_url: String,
    pub feed_api_key: String,
    /// Season whose events are synchronized.
    pub feed_year: i32,
    pub sync_workers: usize,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            feed_base_url: optional("FEED_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FEED_BASE_URL.to_string()),
            feed_api_key: required("FEED_API_KEY")?,
            feed_year: parsed("FEED_YEAR")?.unwrap_or_else(|| Utc::now().year()),
            sync_workers: parsed("SYNC_WORKERS")?.unwrap_or(DEFAULT_SYNC_WORKERS),
            user_agent: optional("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

fn parsed<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional(var)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
