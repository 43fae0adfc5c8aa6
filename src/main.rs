use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod core;
mod impact;
mod neo;
mod ui;
mod viewer;
mod visualization;

use crate::core::camera::{pose_camera_for_screen, spawn_main_camera};
use crate::core::screen::AppScreen;
use impact::ImpactPlugin;
use neo::NeoPlugin;
use ui::UiPlugin;
use viewer::ViewerPlugin;
use visualization::{EarthPlugin, VisualizationPlugin};

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Asteroid Impact Simulator".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(EguiPlugin::default());
    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.init_state::<AppScreen>();
    // The first OnEnter runs before Startup, so the camera must already exist.
    app.add_systems(PreStartup, spawn_main_camera);
    app.add_systems(OnEnter(AppScreen::ImpactMap), pose_camera_for_screen);
    app.add_systems(OnEnter(AppScreen::Viewer), pose_camera_for_screen);

    // Add our custom plugins
    app.add_plugins(NeoPlugin);
    app.add_plugins(ImpactPlugin);
    app.add_plugins(EarthPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(ViewerPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
