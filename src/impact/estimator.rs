//! Impact consequence estimates for a selected object.
//!
//! The formulas are a display heuristic, not a physical model: a rocky
//! sphere of the maximum estimated diameter hitting at the first recorded
//! close-approach speed.

use std::f64::consts::PI;

use crate::impact::format::{kilometers, to_fixed};
use crate::impact::types::{
    Consequences, IMPACT_DISPLAY_RADIUS_M, ImpactDetails, ImpactEvent, LatLng, Mitigation,
    SourceSummary, ThreatLevel,
};
use crate::neo::AsteroidRecord;

/// kg/m^3
pub const ROCK_DENSITY: f64 = 3000.0;
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
/// Richter magnitude before the energy term is added.
pub const SEISMIC_BASE_MAGNITUDE: f64 = 6.0;
pub const AIR_BLAST_NOTE: &str = "Significant overpressure event expected.";
pub const RECOMMENDED_ACTION: &str = "Further observation to refine orbital parameters.";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("{name} has no close approach data")]
    MissingCloseApproach { name: String },

    #[error("{name} has a non-numeric velocity {raw:?}")]
    InvalidVelocity { name: String, raw: String },
}

/// Kinetic energy in megatons TNT for a sphere of `diameter_m` at `velocity_km_s`.
pub fn kinetic_energy_megatons(diameter_m: f64, velocity_km_s: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let volume = (4.0 / 3.0) * PI * radius.powi(3);
    let mass = ROCK_DENSITY * volume;
    let velocity_m_s = velocity_km_s * 1000.0;
    let joules = 0.5 * mass * velocity_m_s.powi(2);
    joules / JOULES_PER_MEGATON
}

/// Two-decimal display energy, and the one-decimal magnitude derived from
/// that rounded value.
fn energy_and_magnitude(energy_megatons: f64) -> (String, String) {
    let energy = to_fixed(energy_megatons, 2);
    let rounded = energy.parse::<f64>().unwrap_or(energy_megatons);
    let magnitude = SEISMIC_BASE_MAGNITUDE + rounded / 1000.0;
    (energy, to_fixed(magnitude, 1))
}

pub fn estimate_impact(
    record: &AsteroidRecord,
    position: LatLng,
) -> Result<ImpactEvent, EstimateError> {
    let name = record.display_name();
    let approach = record
        .first_close_approach()
        .ok_or_else(|| EstimateError::MissingCloseApproach { name: name.clone() })?;
    let velocity_km_s =
        approach
            .velocity_km_s()
            .ok_or_else(|| EstimateError::InvalidVelocity {
                name: name.clone(),
                raw: approach.relative_velocity.kilometers_per_second.clone(),
            })?;

    let diameter_m = record.diameter_max_m();
    let energy_megatons = kinetic_energy_megatons(diameter_m, velocity_km_s);
    let (energy, magnitude) = energy_and_magnitude(energy_megatons);

    let miss_distance = match approach.miss_distance_km() {
        Some(km) => kilometers(km),
        None => format!("{} km", approach.miss_distance.kilometers),
    };
    let hazardous = record.is_potentially_hazardous_asteroid;

    Ok(ImpactEvent {
        position,
        radius_m: IMPACT_DISPLAY_RADIUS_M,
        energy_megatons,
        details: ImpactDetails {
            source: SourceSummary {
                name,
                diameter: format!("{} meters", to_fixed(diameter_m, 2)),
                velocity: format!("{} km/s", to_fixed(velocity_km_s, 2)),
                is_potentially_hazardous: hazardous,
                close_approach_date: approach.display_date().to_string(),
                miss_distance,
                absolute_magnitude: record.absolute_magnitude_h.to_string(),
                jpl_url: record.nasa_jpl_url.clone(),
            },
            consequences: Consequences {
                impact_energy: format!("{} Megatons TNT", energy),
                seismic_effect: format!("Magnitude {} Richter", magnitude),
                air_blast: AIR_BLAST_NOTE.to_string(),
            },
            mitigation: Mitigation {
                threat_level: ThreatLevel::from_hazard_flag(hazardous),
                recommended_action: RECOMMENDED_ACTION.to_string(),
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::types::test_support::record;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn reference_asteroid_energy_and_magnitude() {
        let rec = record("1", "(2025 AB)", 340.0, "20");
        let event = estimate_impact(&rec, LatLng::new(10.0, 20.0)).unwrap();

        assert_relative_eq!(event.energy_megatons, 2951.174896192477, max_relative = 1e-12);
        assert_eq!(event.details.consequences.impact_energy, "2951.17 Megatons TNT");
        assert_eq!(event.details.consequences.seismic_effect, "Magnitude 9.0 Richter");
        assert_eq!(event.details.consequences.air_blast, AIR_BLAST_NOTE);
    }

    #[test]
    fn large_object_uses_rounded_energy_for_magnitude() {
        let rec = record("2", "Big", 1500.0, "25.3");
        let event = estimate_impact(&rec, LatLng::default()).unwrap();
        assert_eq!(event.details.consequences.impact_energy, "405520.70 Megatons TNT");
        assert_eq!(event.details.consequences.seismic_effect, "Magnitude 411.5 Richter");
    }

    #[test]
    fn magnitude_tie_rounds_up() {
        assert_eq!(
            energy_and_magnitude(250.0),
            ("250.00".to_string(), "6.3".to_string())
        );
        assert_eq!(
            energy_and_magnitude(249.996),
            ("250.00".to_string(), "6.3".to_string())
        );
    }

    #[test]
    fn velocity_tie_rounds_up() {
        let rec = record("6", "x", 10.0, "20.125");
        let event = estimate_impact(&rec, LatLng::default()).unwrap();
        assert_eq!(event.details.source.velocity, "20.13 km/s");
    }

    #[test]
    fn source_summary_display_fields() {
        let rec = record("3", "(2025 AB)", 340.0, "20.123");
        let event = estimate_impact(&rec, LatLng::new(1.0, 2.0)).unwrap();
        let source = &event.details.source;
        assert_eq!(source.name, "2025 AB");
        assert_eq!(source.diameter, "340.00 meters");
        assert_eq!(source.velocity, "20.12 km/s");
        assert_eq!(source.close_approach_date, "2025-Jun-01 12:34");
        assert_eq!(source.miss_distance, "54,561,458.235 km");
        assert_eq!(source.absolute_magnitude, "22.1");
        assert!(!source.is_potentially_hazardous);
        assert_eq!(event.details.mitigation.threat_level, ThreatLevel::Low);
        assert_eq!(event.details.mitigation.recommended_action, RECOMMENDED_ACTION);
    }

    #[test]
    fn whole_magnitude_prints_without_fraction() {
        let mut rec = record("4", "x", 10.0, "5");
        rec.absolute_magnitude_h = 19.0;
        let event = estimate_impact(&rec, LatLng::default()).unwrap();
        assert_eq!(event.details.source.absolute_magnitude, "19");
    }

    #[test]
    fn position_is_not_normalized() {
        let rec = record("5", "x", 10.0, "5");
        let event = estimate_impact(&rec, LatLng::new(95.0, 370.0)).unwrap();
        assert_eq!(event.position, LatLng::new(95.0, 370.0));
    }

    #[test]
    fn missing_close_approach_is_an_error() {
        let mut rec = record("6", "(Lost)", 10.0, "5");
        rec.close_approach_data.clear();
        assert_eq!(
            estimate_impact(&rec, LatLng::default()),
            Err(EstimateError::MissingCloseApproach {
                name: "Lost".to_string()
            })
        );
    }

    #[test]
    fn non_numeric_velocity_is_an_error() {
        let rec = record("7", "x", 10.0, "fast");
        assert!(matches!(
            estimate_impact(&rec, LatLng::default()),
            Err(EstimateError::InvalidVelocity { .. })
        ));
    }

    proptest! {
        #[test]
        fn radius_is_constant(diameter in 0.1f64..5000.0, velocity in 0.1f64..80.0) {
            let rec = record("p", "p", diameter, &velocity.to_string());
            let event = estimate_impact(&rec, LatLng::default()).unwrap();
            prop_assert_eq!(event.radius_m, IMPACT_DISPLAY_RADIUS_M);
        }

        #[test]
        fn threat_follows_hazard_flag(hazardous in any::<bool>(), diameter in 1.0f64..2000.0) {
            let mut rec = record("p", "p", diameter, "12.5");
            rec.is_potentially_hazardous_asteroid = hazardous;
            let event = estimate_impact(&rec, LatLng::default()).unwrap();
            let expected = if hazardous {
                ThreatLevel::MonitoringRequired
            } else {
                ThreatLevel::Low
            };
            prop_assert_eq!(event.details.mitigation.threat_level, expected);
        }

        #[test]
        fn energy_grows_with_velocity(diameter in 1.0f64..2000.0, v in 1.0f64..40.0) {
            prop_assert!(kinetic_energy_megatons(diameter, v * 2.0) > kinetic_energy_megatons(diameter, v));
        }
    }
}
