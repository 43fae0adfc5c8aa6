//! User interface module
//!
//! This module handles UI state management, panels, and systems for the
//! egui-based user interface.

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::core::screen::AppScreen;

pub mod panels;
pub mod state;
pub mod systems;

pub use state::UIState;
pub use systems::{impact_map_ui_system, viewer_ui_system};

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UIState>().add_systems(
            EguiPrimaryContextPass,
            (
                impact_map_ui_system.run_if(in_state(AppScreen::ImpactMap)),
                viewer_ui_system.run_if(in_state(AppScreen::Viewer)),
            ),
        );
    }
}
