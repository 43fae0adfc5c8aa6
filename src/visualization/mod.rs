//! Visualization module
//!
//! The globe, its lighting and the impact overlay of the map screen.

use bevy::prelude::*;

use crate::core::screen::AppScreen;

pub mod earth;
pub mod impact_marker;
pub mod lighting;

pub use earth::EarthPlugin;
pub use impact_marker::{ImpactMarkerConfig, draw_impact_marker};
pub use lighting::{SunLight, spawn_sun_light};

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ImpactMarkerConfig>()
            .add_systems(OnEnter(AppScreen::ImpactMap), spawn_sun_light)
            .add_systems(
                Update,
                draw_impact_marker.run_if(in_state(AppScreen::ImpactMap)),
            );
    }
}
