//! Host configuration from environment variables.
//!
//! Callers load `.env` first (the CLI and server call `dotenv::dotenv().ok()`), then
//! [`HostConfig::from_env`]. Tests use [`HostConfig::from_lookup`] with a map.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_WEATHER_AGENT_URL: &str = "http://localhost:10001";
pub const DEFAULT_RENTAL_AGENT_URL: &str = "http://localhost:10002";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Error type used for config loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{0} is set but lists no URLs")]
    EmptyList(&'static str),
}

/// Specialist endpoints and HTTP timeouts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Base URLs whose agent cards are fetched at startup, in order.
    pub specialist_urls: Vec<String>,
    pub http_timeout: Duration,
    pub http_connect_timeout: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            specialist_urls: vec![
                DEFAULT_RENTAL_AGENT_URL.to_string(),
                DEFAULT_WEATHER_AGENT_URL.to_string(),
            ],
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            http_connect_timeout: Duration::from_secs(DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl HostConfig {
    /// Fill config from process env vars.
    ///
    /// `SPECIALIST_URLS` (comma separated) wins over the pair `RENTAL_AGENT_URL` /
    /// `WEATHER_AGENT_URL`, which default to localhost:10002 and localhost:10001.
    /// `HTTP_TIMEOUT_SECS` (120) and `HTTP_CONNECT_TIMEOUT_SECS` (30) are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let specialist_urls = match lookup("SPECIALIST_URLS") {
            Some(list) => {
                let urls: Vec<String> = list
                    .split(',')
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(String::from)
                    .collect();
                if urls.is_empty() {
                    return Err(ConfigError::EmptyList("SPECIALIST_URLS"));
                }
                urls
            }
            None => vec![
                lookup("RENTAL_AGENT_URL").unwrap_or_else(|| DEFAULT_RENTAL_AGENT_URL.to_string()),
                lookup("WEATHER_AGENT_URL").unwrap_or_else(|| DEFAULT_WEATHER_AGENT_URL.to_string()),
            ],
        };
        Ok(Self {
            specialist_urls,
            http_timeout: seconds(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            http_connect_timeout: seconds(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_SECS",
                DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
            )?,
        })
    }

    /// Replaces the specialist list when `urls` is non-empty (e.g. repeated `--specialist`).
    pub fn with_specialist_urls(mut self, urls: Vec<String>) -> Self {
        if !urls.is_empty() {
            self.specialist_urls = urls;
        }
        self
    }

    #[cfg(feature = "a2a")]
    pub fn timeouts(&self) -> crate::specialist::HttpTimeouts {
        crate::specialist::HttpTimeouts {
            request: self.http_timeout,
            connect: self.http_connect_timeout,
        }
    }
}

fn seconds<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}
