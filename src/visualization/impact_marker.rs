//! Impact circle drawn on the globe with gizmos.

use bevy::prelude::*;

use crate::core::coordinates::{Coordinates, EARTH_RADIUS_KM, surface_circle};
use crate::impact::{ImpactEvent, ImpactSession};

/// Appearance of the impact overlay.
#[derive(Resource, Debug, Clone)]
pub struct ImpactMarkerConfig {
    pub circle_segments: u32,
    pub color: Color,
    /// Inner rings drawn at lower alpha to suggest a filled disc.
    pub fill_rings: u32,
    pub fill_alpha: f32,
    /// Drawn slightly above the surface to avoid z-fighting, km.
    pub lift_km: f32,
    /// Half-length of the center cross arms, km.
    pub center_mark_km: f32,
}

impl Default for ImpactMarkerConfig {
    fn default() -> Self {
        Self {
            circle_segments: 96,
            color: Color::srgb(1.0, 0.0, 0.0),
            fill_rings: 4,
            fill_alpha: 0.3,
            lift_km: 2.0,
            center_mark_km: 40.0,
        }
    }
}

pub fn draw_impact_marker(
    mut gizmos: Gizmos,
    session: Res<ImpactSession>,
    config: Res<ImpactMarkerConfig>,
) {
    let Some(impact) = session.impact.as_ref() else {
        return;
    };
    for (points, alpha) in marker_rings(impact, &config) {
        let color = config.color.with_alpha(alpha);
        if let Some(first) = points.first().copied() {
            gizmos.linestrip(points.into_iter().chain(std::iter::once(first)), color);
        }
    }

    let center = Coordinates::from_degrees(impact.position.lat, impact.position.lng);
    let up = center.direction();
    let surface = up * (EARTH_RADIUS_KM + config.lift_km);
    let east = if up.y.abs() < 0.999 {
        Vec3::Y.cross(up).normalize()
    } else {
        Vec3::X
    };
    let north = up.cross(east);
    let arm = config.center_mark_km;
    gizmos.line(surface - east * arm, surface + east * arm, config.color);
    gizmos.line(surface - north * arm, surface + north * arm, config.color);
}

/// Outline plus fill rings, each with the alpha it is drawn at.
pub fn marker_rings(impact: &ImpactEvent, config: &ImpactMarkerConfig) -> Vec<(Vec<Vec3>, f32)> {
    let center = Coordinates::from_degrees(impact.position.lat, impact.position.lng);
    let radius_km = (impact.radius_m / 1000.0) as f32;
    let sphere = EARTH_RADIUS_KM + config.lift_km;

    let mut rings = vec![(
        surface_circle(center, radius_km, sphere, config.circle_segments),
        1.0,
    )];
    for i in 1..=config.fill_rings {
        let fraction = 1.0 - i as f32 / (config.fill_rings + 1) as f32;
        rings.push((
            surface_circle(center, radius_km * fraction, sphere, config.circle_segments),
            config.fill_alpha,
        ));
    }
    rings
}
