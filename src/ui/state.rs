//! UI state management

use bevy::prelude::*;

/// Main UI state resource
#[derive(Resource)]
pub struct UIState {
    pub sidebar_width_px: f32,
    pub show_attribution: bool,
    /// Render the globe only in the area the sidebar leaves free.
    pub crop_3d_viewport_to_ui: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            sidebar_width_px: 384.0,
            show_attribution: true,
            crop_3d_viewport_to_ui: true,
        }
    }
}

/// Something the user asked for on the map sidebar this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    Select(String),
    Reset,
    OpenViewer,
}

/// Something the user asked for on the viewer overlay this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerAction {
    Select(String),
    BackToMap,
}
