//! The single main camera, re-posed whenever the screen changes.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::core::screen::AppScreen;

#[derive(Component)]
pub struct MainCamera;

/// Where the orbit camera sits and how far it may zoom on one screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom_limits: (f32, f32),
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraPose {
    /// Globe in kilometers, looking at 20N 0E like a flat map centred there.
    pub fn impact_map() -> Self {
        Self {
            radius: 25_000.0,
            yaw: 0.0,
            pitch: 20f32.to_radians(),
            zoom_limits: (6_600.0, 120_000.0),
            fov: std::f32::consts::FRAC_PI_4,
            // World units are kilometers; the default far plane would clip the Earth.
            near: 1.0,
            far: 250_000.0,
        }
    }

    /// Asteroid model at the origin, camera at (3, 3, 3).
    pub fn viewer() -> Self {
        Self::looking_from(Vec3::new(3.0, 3.0, 3.0), 60f32.to_radians(), (0.5, 50.0))
    }

    fn looking_from(position: Vec3, fov: f32, zoom_limits: (f32, f32)) -> Self {
        let radius = position.length();
        Self {
            radius,
            yaw: position.x.atan2(position.z),
            pitch: (position.y / radius).asin(),
            zoom_limits,
            fov,
            near: 0.01,
            far: 1_000.0,
        }
    }

    pub fn for_screen(screen: AppScreen) -> Self {
        match screen {
            AppScreen::ImpactMap => Self::impact_map(),
            AppScreen::Viewer => Self::viewer(),
        }
    }

    pub fn apply(&self, pan_orbit: &mut PanOrbitCamera, projection: &mut Projection) {
        pan_orbit.focus = Vec3::ZERO;
        pan_orbit.target_focus = Vec3::ZERO;
        pan_orbit.radius = Some(self.radius);
        pan_orbit.target_radius = self.radius;
        pan_orbit.yaw = Some(self.yaw);
        pan_orbit.target_yaw = self.yaw;
        pan_orbit.pitch = Some(self.pitch);
        pan_orbit.target_pitch = self.pitch;
        pan_orbit.zoom_lower_limit = self.zoom_limits.0;
        pan_orbit.zoom_upper_limit = Some(self.zoom_limits.1);
        pan_orbit.force_update = true;

        *projection = Projection::Perspective(PerspectiveProjection {
            fov: self.fov,
            near: self.near,
            far: self.far,
            ..default()
        });
    }
}

/// Spawned before the first screen is entered so every screen finds it.
pub fn spawn_main_camera(mut commands: Commands) {
    let pose = CameraPose::impact_map();
    let mut pan_orbit = PanOrbitCamera::default();
    let mut projection = Projection::default();
    pose.apply(&mut pan_orbit, &mut projection);

    commands.spawn((
        Camera3d::default(),
        projection,
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, pose.radius).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn pose_camera_for_screen(
    screen: Res<State<AppScreen>>,
    mut cameras: Query<(&mut PanOrbitCamera, &mut Projection), With<MainCamera>>,
) {
    let pose = CameraPose::for_screen(*screen.get());
    for (mut pan_orbit, mut projection) in cameras.iter_mut() {
        pose.apply(&mut pan_orbit, &mut projection);
    }
    info!("[CAMERA] posed for {:?}", screen.get());
}
