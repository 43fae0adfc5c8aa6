//! Impact event data shown by the sidebar and drawn on the globe.

use std::fmt;

use crate::impact::format::to_fixed;

/// Circle radius drawn around every impact, in meters. Fixed for every
/// object; it is not derived from the asteroid's size.
pub const IMPACT_DISPLAY_RADIUS_M: f64 = 60_000.0;

/// Geographic position in degrees, exactly as picked (no wrapping).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {}, Lng: {}",
            to_fixed(self.lat, 3),
            to_fixed(self.lng, 3)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    Low,
    MonitoringRequired,
}

impl ThreatLevel {
    pub fn from_hazard_flag(is_potentially_hazardous: bool) -> Self {
        if is_potentially_hazardous {
            ThreatLevel::MonitoringRequired
        } else {
            ThreatLevel::Low
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreatLevel::Low => f.write_str("LOW"),
            ThreatLevel::MonitoringRequired => f.write_str("MONITORING REQUIRED"),
        }
    }
}

/// Display copy of the source object, denormalized at click time.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub name: String,
    pub diameter: String,
    pub velocity: String,
    pub is_potentially_hazardous: bool,
    pub close_approach_date: String,
    pub miss_distance: String,
    pub absolute_magnitude: String,
    pub jpl_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Consequences {
    pub impact_energy: String,
    pub seismic_effect: String,
    pub air_blast: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mitigation {
    pub threat_level: ThreatLevel,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactDetails {
    pub source: SourceSummary,
    pub consequences: Consequences,
    pub mitigation: Mitigation,
}

/// One simulated impact. Replaced wholesale on every click.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEvent {
    pub position: LatLng,
    pub radius_m: f64,
    pub details: ImpactDetails,
    /// Unrounded kinetic energy in megatons TNT.
    pub energy_megatons: f64,
}
