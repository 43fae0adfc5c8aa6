//! NeoWs systems (request on mount + apply results).

use crate::neo::error::NeoError;
use crate::neo::fetcher::{build_browse_url, build_feed_url, start_neo_worker};
use crate::neo::settings::NeoConfig;
use crate::neo::types::{
    BrowseCatalog, FeedCatalog, FetchState, NeoChannels, NeoCommand, NeoEndpoint,
    NeoRequestCounter, NeoResult,
};
use bevy::prelude::*;

pub fn setup_neo_worker(mut commands: Commands) {
    let channels = start_neo_worker();
    info!("[INIT] NeoWs worker started");
    commands.insert_resource(channels);
}

/// Issue a fresh feed request for the impact map screen.
pub fn request_feed(
    config: Res<NeoConfig>,
    mut counter: ResMut<NeoRequestCounter>,
    mut catalog: ResMut<FeedCatalog>,
    channels: Option<Res<NeoChannels>>,
) {
    catalog.records.clear();
    let request_id = counter.next_id();
    catalog.state.begin(request_id);
    let command = build_feed_url(&config).map(|url| NeoCommand::FetchFeed { request_id, url });
    dispatch(command, channels.as_deref(), &mut catalog.state);
}

/// Issue a fresh browse request for the 3D viewer screen.
pub fn request_browse(
    config: Res<NeoConfig>,
    mut counter: ResMut<NeoRequestCounter>,
    mut catalog: ResMut<BrowseCatalog>,
    channels: Option<Res<NeoChannels>>,
) {
    catalog.records.clear();
    let request_id = counter.next_id();
    catalog.state.begin(request_id);
    let command = build_browse_url(&config).map(|url| NeoCommand::FetchBrowse { request_id, url });
    dispatch(command, channels.as_deref(), &mut catalog.state);
}

fn dispatch(
    command: Result<NeoCommand, NeoError>,
    channels: Option<&NeoChannels>,
    state: &mut FetchState,
) {
    let sent = command.and_then(|cmd| {
        let channels = channels.ok_or(NeoError::WorkerUnavailable)?;
        channels
            .cmd_tx
            .send(cmd)
            .map_err(|_| NeoError::WorkerUnavailable)
    });
    if let Err(err) = sent {
        warn!("[NEO] request not sent: {}", err);
        state.fail(err.to_string());
    }
}

/// Forget the feed when the impact map screen unmounts.
pub fn clear_feed(mut catalog: ResMut<FeedCatalog>) {
    *catalog = FeedCatalog::default();
}

pub fn clear_browse(mut catalog: ResMut<BrowseCatalog>) {
    *catalog = BrowseCatalog::default();
}

/// Drain worker results; anything not expected by the current mount is dropped.
pub fn apply_neo_results(
    mut feed: ResMut<FeedCatalog>,
    mut browse: ResMut<BrowseCatalog>,
    channels: Option<Res<NeoChannels>>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        apply_result(msg, &mut feed, &mut browse);
    }
}

pub(crate) fn apply_result(msg: NeoResult, feed: &mut FeedCatalog, browse: &mut BrowseCatalog) {
    match msg {
        NeoResult::Feed {
            request_id,
            records,
        } => {
            if !feed.state.expects(request_id) {
                debug!("[NEO] dropping stale feed result {}", request_id);
                return;
            }
            feed.records = records;
            feed.state.succeed();
        }
        NeoResult::Browse {
            request_id,
            records,
        } => {
            if !browse.state.expects(request_id) {
                debug!("[NEO] dropping stale browse result {}", request_id);
                return;
            }
            browse.records = records;
            browse.state.succeed();
        }
        NeoResult::Error {
            endpoint,
            request_id,
            error,
        } => {
            let state = match endpoint {
                NeoEndpoint::Feed => &mut feed.state,
                NeoEndpoint::Browse => &mut browse.state,
            };
            if !state.expects(request_id) {
                debug!("[NEO] dropping stale {} error {}", endpoint, request_id);
                return;
            }
            state.fail(error);
        }
    }
}
