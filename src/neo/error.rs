//! Error taxonomy for the NeoWs client.

use chrono::NaiveDate;

use crate::neo::types::NeoEndpoint;

#[derive(thiserror::Error, Debug)]
pub enum NeoError {
    #[error("missing NASA API key (set NASA_API_KEY or add api_key to the settings file)")]
    MissingApiKey,

    #[error("invalid feed window {start}..{end} (start must not be after end and span at most {max_days} days)")]
    InvalidFeedWindow {
        start: NaiveDate,
        end: NaiveDate,
        max_days: i64,
    },

    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),

    #[error("HTTP {status} from {endpoint}")]
    Http {
        endpoint: NeoEndpoint,
        status: reqwest::StatusCode,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: NeoEndpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON from {endpoint}: {source}")]
    Parse {
        endpoint: NeoEndpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("No asteroids found in the selected date range.")]
    EmptyFeed,

    #[error("fetch worker is not running")]
    WorkerUnavailable,
}
