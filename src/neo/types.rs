//! NeoWs data types and worker communication structures

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

/// One near-Earth object as returned by the browse and feed endpoints.
///
/// Only the fields the simulator displays are modelled; everything else in
/// the NeoWs payload is ignored during deserialization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AsteroidRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
}

/// Velocities arrive as numeric strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

impl AsteroidRecord {
    /// Name with every parenthesis removed, e.g. `(2025 AB)` -> `2025 AB`.
    pub fn display_name(&self) -> String {
        self.name.replace(['(', ')'], "")
    }

    pub fn diameter_min_m(&self) -> f64 {
        self.estimated_diameter.meters.estimated_diameter_min
    }

    pub fn diameter_max_m(&self) -> f64 {
        self.estimated_diameter.meters.estimated_diameter_max
    }

    pub fn first_close_approach(&self) -> Option<&CloseApproach> {
        self.close_approach_data.first()
    }
}

impl CloseApproach {
    pub fn velocity_km_s(&self) -> Option<f64> {
        self.relative_velocity
            .kilometers_per_second
            .trim()
            .parse::<f64>()
            .ok()
    }

    pub fn miss_distance_km(&self) -> Option<f64> {
        self.miss_distance.kilometers.trim().parse::<f64>().ok()
    }

    /// Full timestamp when the catalog provides one, otherwise the bare date.
    pub fn display_date(&self) -> &str {
        self.close_approach_date_full
            .as_deref()
            .unwrap_or(&self.close_approach_date)
    }
}

/// `GET /neo/browse` response body.
#[derive(Debug, Deserialize)]
pub struct BrowseResponse {
    pub near_earth_objects: Vec<AsteroidRecord>,
}

/// `GET /feed` response body: records grouped by ISO date.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub near_earth_objects: BTreeMap<String, Vec<AsteroidRecord>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeoEndpoint {
    Browse,
    Feed,
}

impl fmt::Display for NeoEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeoEndpoint::Browse => f.write_str("neo/browse"),
            NeoEndpoint::Feed => f.write_str("feed"),
        }
    }
}

/// Commands for the NeoWs worker thread
#[derive(Debug)]
pub enum NeoCommand {
    FetchBrowse { request_id: u64, url: String },
    FetchFeed { request_id: u64, url: String },
}

/// Results from the NeoWs worker thread
#[derive(Debug)]
pub enum NeoResult {
    Browse {
        request_id: u64,
        records: Vec<AsteroidRecord>,
    },
    Feed {
        request_id: u64,
        records: Vec<AsteroidRecord>,
    },
    Error {
        endpoint: NeoEndpoint,
        request_id: u64,
        error: String,
    },
}

/// Resource containing channels for communicating with the NeoWs worker thread
#[derive(Resource)]
pub struct NeoChannels {
    pub cmd_tx: Sender<NeoCommand>,
    pub res_rx: Arc<Mutex<Receiver<NeoResult>>>,
}

/// Loading/error state of one fetch, one per screen that fetches.
#[derive(Debug, Default, Clone)]
pub struct FetchState {
    pub is_loading: bool,
    pub error: Option<String>,
    /// Id of the request whose result is still wanted.
    pub pending_request: Option<u64>,
}

impl FetchState {
    pub fn begin(&mut self, request_id: u64) {
        self.is_loading = true;
        self.error = None;
        self.pending_request = Some(request_id);
    }

    /// True when `request_id` belongs to the current mount.
    pub fn expects(&self, request_id: u64) -> bool {
        self.pending_request == Some(request_id)
    }

    pub fn succeed(&mut self) {
        self.is_loading = false;
        self.error = None;
        self.pending_request = None;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.is_loading = false;
        self.error = Some(error.into());
        self.pending_request = None;
    }
}

/// Records loaded for the impact map screen (feed endpoint).
#[derive(Resource, Debug, Default)]
pub struct FeedCatalog {
    pub records: Vec<AsteroidRecord>,
    pub state: FetchState,
}

/// Records loaded for the 3D viewer screen (browse endpoint).
#[derive(Resource, Debug, Default)]
pub struct BrowseCatalog {
    pub records: Vec<AsteroidRecord>,
    pub state: FetchState,
}

/// Monotonic id source so results from an earlier mount can be told apart.
#[derive(Resource, Debug, Default)]
pub struct NeoRequestCounter {
    next: u64,
}

impl NeoRequestCounter {
    pub fn next_id(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn record(id: &str, name: &str, diameter_max: f64, velocity_km_s: &str) -> AsteroidRecord {
        AsteroidRecord {
            id: id.to_string(),
            name: name.to_string(),
            nasa_jpl_url: format!("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr={id}"),
            absolute_magnitude_h: 22.1,
            estimated_diameter: EstimatedDiameter {
                meters: DiameterRange {
                    estimated_diameter_min: diameter_max / 2.0,
                    estimated_diameter_max: diameter_max,
                },
            },
            is_potentially_hazardous_asteroid: false,
            close_approach_data: vec![CloseApproach {
                close_approach_date: "2025-06-01".to_string(),
                close_approach_date_full: Some("2025-Jun-01 12:34".to_string()),
                relative_velocity: RelativeVelocity {
                    kilometers_per_second: velocity_km_s.to_string(),
                },
                miss_distance: MissDistance {
                    kilometers: "54561458.2348".to_string(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;

    #[test]
    fn display_name_strips_all_parentheses() {
        let rec = record("1", "(2025 AB)", 10.0, "1");
        assert_eq!(rec.display_name(), "2025 AB");

        let nested = record("2", "433 Eros (A898 PA)", 10.0, "1");
        assert_eq!(nested.display_name(), "433 Eros A898 PA");
    }

    #[test]
    fn close_approach_parses_numeric_strings() {
        let rec = record("1", "x", 10.0, " 20.5 ");
        let approach = rec.first_close_approach().unwrap();
        assert_eq!(approach.velocity_km_s(), Some(20.5));
        assert_eq!(approach.miss_distance_km(), Some(54561458.2348));
    }

    #[test]
    fn display_date_falls_back_to_bare_date() {
        let mut rec = record("1", "x", 10.0, "1");
        rec.close_approach_data[0].close_approach_date_full = None;
        assert_eq!(rec.close_approach_data[0].display_date(), "2025-06-01");
    }

    #[test]
    fn stale_request_is_not_expected() {
        let mut counter = NeoRequestCounter::default();
        let mut state = FetchState::default();
        let first = counter.next_id();
        state.begin(first);
        let second = counter.next_id();
        state.begin(second);
        assert!(!state.expects(first));
        assert!(state.expects(second));
        state.succeed();
        assert!(!state.expects(second));
        assert!(!state.is_loading);
    }

    #[test]
    fn fail_resolves_loading_and_sets_error() {
        let mut state = FetchState::default();
        state.begin(7);
        state.fail("boom");
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }
}
