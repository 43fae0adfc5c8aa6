//! NeoWs fetcher worker.

use crate::neo::error::NeoError;
use crate::neo::settings::NeoConfig;
use crate::neo::types::{
    AsteroidRecord, BrowseResponse, FeedResponse, NeoChannels, NeoCommand, NeoEndpoint, NeoResult,
};
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

/// Start the background worker thread that owns the HTTP client.
///
/// Each command runs as its own task, so a slow feed request never holds
/// back a browse request.
pub fn start_neo_worker() -> NeoChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<NeoCommand>();
    let (res_tx, res_rx) = mpsc::channel::<NeoResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                error!("[NEO] failed to start tokio runtime: {}", err);
                return;
            }
        };
        let client = reqwest::Client::new();

        while let Ok(cmd) = cmd_rx.recv() {
            rt.spawn(run_command(client.clone(), cmd, res_tx.clone()));
        }
    });

    NeoChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

async fn run_command(client: reqwest::Client, cmd: NeoCommand, res_tx: mpsc::Sender<NeoResult>) {
    let (endpoint, request_id, result) = match cmd {
        NeoCommand::FetchBrowse { request_id, url } => {
            let res = fetch_browse_list(&client, &url)
                .await
                .map(|records| NeoResult::Browse {
                    request_id,
                    records,
                });
            (NeoEndpoint::Browse, request_id, res)
        }
        NeoCommand::FetchFeed { request_id, url } => {
            let res = fetch_feed(&client, &url)
                .await
                .map(|records| NeoResult::Feed {
                    request_id,
                    records,
                });
            (NeoEndpoint::Feed, request_id, res)
        }
    };

    let msg = result.unwrap_or_else(|err| {
        warn!("[NEO] {} fetch failed: {}", endpoint, err);
        NeoResult::Error {
            endpoint,
            request_id,
            error: err.to_string(),
        }
    });
    // The app side may already be gone at shutdown.
    let _ = res_tx.send(msg);
}

pub async fn fetch_browse_list(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<AsteroidRecord>, NeoError> {
    let body = fetch_body(client, NeoEndpoint::Browse, url).await?;
    let records = parse_browse(&body)?;
    info!("[NEO] browse returned {} objects", records.len());
    Ok(records)
}

pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<AsteroidRecord>, NeoError> {
    let body = fetch_body(client, NeoEndpoint::Feed, url).await?;
    let records = parse_feed(&body)?;
    info!("[NEO] feed returned {} objects", records.len());
    Ok(records)
}

async fn fetch_body(
    client: &reqwest::Client,
    endpoint: NeoEndpoint,
    url: &str,
) -> Result<String, NeoError> {
    // Errors drop the URL: it carries the API key.
    let transport = |source: reqwest::Error| NeoError::Transport {
        endpoint,
        source: source.without_url(),
    };
    let resp = client
        .get(url)
        .header("accept", "application/json")
        .send()
        .await
        .map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(NeoError::Http { endpoint, status });
    }
    resp.text().await.map_err(transport)
}

pub fn parse_browse(body: &str) -> Result<Vec<AsteroidRecord>, NeoError> {
    let resp: BrowseResponse = serde_json::from_str(body).map_err(|source| NeoError::Parse {
        endpoint: NeoEndpoint::Browse,
        source,
    })?;
    Ok(resp.near_earth_objects)
}

/// Parse a feed body and flatten it; an empty result is an error.
pub fn parse_feed(body: &str) -> Result<Vec<AsteroidRecord>, NeoError> {
    let resp: FeedResponse = serde_json::from_str(body).map_err(|source| NeoError::Parse {
        endpoint: NeoEndpoint::Feed,
        source,
    })?;
    let records = flatten_feed(resp.near_earth_objects);
    if records.is_empty() {
        return Err(NeoError::EmptyFeed);
    }
    Ok(records)
}

/// Concatenate every date's list. Dates come out in ascending key order,
/// records within a date keep their upstream order.
pub fn flatten_feed(by_date: BTreeMap<String, Vec<AsteroidRecord>>) -> Vec<AsteroidRecord> {
    by_date.into_values().flatten().collect()
}

pub fn build_browse_url(config: &NeoConfig) -> Result<String, NeoError> {
    let api_key = config.api_key()?;
    let mut url = parse_base(config, "neo/browse")?;
    url.query_pairs_mut().append_pair("api_key", api_key);
    Ok(url.to_string())
}

pub fn build_feed_url(config: &NeoConfig) -> Result<String, NeoError> {
    let api_key = config.api_key()?;
    config.validate_feed_window()?;
    let mut url = parse_base(config, "feed")?;
    url.query_pairs_mut()
        .append_pair("start_date", &config.feed_start.format("%Y-%m-%d").to_string())
        .append_pair("end_date", &config.feed_end.format("%Y-%m-%d").to_string())
        .append_pair("api_key", api_key);
    Ok(url.to_string())
}

fn parse_base(config: &NeoConfig, path: &str) -> Result<reqwest::Url, NeoError> {
    reqwest::Url::parse(&format!("{}/{}", config.base_url, path))
        .map_err(|_| NeoError::InvalidBaseUrl(config.base_url.clone()))
}
