//! 3D viewer screen: one asteroid model scaled to the selected object.

use bevy::prelude::*;

use crate::core::screen::AppScreen;
use crate::neo::systems::apply_neo_results;

pub mod scene;
pub mod selection;

pub use scene::{AsteroidModel, display_scale};
pub use selection::ViewerSelection;

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerSelection>()
            .add_systems(OnEnter(AppScreen::Viewer), scene::spawn_viewer_scene)
            .add_systems(OnExit(AppScreen::Viewer), selection::reset_selection)
            .add_systems(
                Update,
                (selection::default_to_first, scene::update_asteroid_model)
                    .chain()
                    .after(apply_neo_results)
                    .run_if(in_state(AppScreen::Viewer)),
            );
    }
}
