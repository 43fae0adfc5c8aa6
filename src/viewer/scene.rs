//! Viewer scene: the asteroid model and its lights.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::core::screen::AppScreen;
use crate::neo::{AsteroidRecord, BrowseCatalog};
use crate::viewer::selection::ViewerSelection;

pub const ASTEROID_MODEL: &str = "asteroid.glb";
/// Fixed presentation tilt, radians.
const MODEL_ROTATION: (f32, f32, f32) = (0.4, 0.2, 0.0);

#[derive(Component)]
pub struct AsteroidModel;

/// Unitless display scale: mean estimated diameter over 100. With nothing
/// selected the mean diameter counts as 1.
pub fn display_scale(record: Option<&AsteroidRecord>) -> f32 {
    let average = record
        .map(|r| (r.diameter_min_m() + r.diameter_max_m()) / 2.0)
        .unwrap_or(1.0);
    (average / 100.0) as f32
}

pub fn spawn_viewer_scene(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(AppScreen::Viewer),
        Name::new("Viewer Key Light"),
    ));

    let (x, y, z) = MODEL_ROTATION;
    commands.spawn((
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(ASTEROID_MODEL))),
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, x, y, z))
            .with_scale(Vec3::splat(display_scale(None))),
        // Hidden until a record is available.
        Visibility::Hidden,
        AsteroidModel,
        DespawnOnExit(AppScreen::Viewer),
        Name::new("Asteroid"),
    ));
    info!("[INIT] viewer scene spawned");
}

pub fn update_asteroid_model(
    catalog: Res<BrowseCatalog>,
    selection: Res<ViewerSelection>,
    mut models: Query<(&mut Transform, &mut Visibility), With<AsteroidModel>>,
) {
    let record = selection.current(&catalog.records);
    let scale = Vec3::splat(display_scale(record));
    let visibility = if record.is_some() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for (mut transform, mut vis) in models.iter_mut() {
        if transform.scale != scale {
            transform.scale = scale;
        }
        vis.set_if_neq(visibility);
    }
}
