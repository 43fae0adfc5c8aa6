//! Lighting for the globe

use bevy::light::{GlobalAmbientLight, SunDisk};
use bevy::prelude::*;

use crate::core::screen::AppScreen;

/// Marker component for the sun directional light
#[derive(Component)]
pub struct SunLight;

const SUN_DISTANCE_KM: f32 = 150_000.0;

/// Fixed sun over the initial view so the clicked hemisphere is lit.
pub fn spawn_sun_light(mut commands: Commands) {
    // Keep the night side readable.
    commands.insert_resource(GlobalAmbientLight {
        brightness: 150.0,
        ..default()
    });

    let direction = Vec3::new(0.3, 0.4, 1.0).normalize();
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        SunDisk::EARTH,
        SunLight,
        Transform::from_translation(direction * SUN_DISTANCE_KM).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(AppScreen::ImpactMap),
        Name::new("Sun"),
    ));
}
