//! UI systems for the egui interface

use bevy::camera::Viewport;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use crate::core::camera::MainCamera;
use crate::core::screen::AppScreen;
use crate::impact::{ImpactSession, SessionMessage};
use crate::neo::{BrowseCatalog, FeedCatalog};
use crate::ui::panels::{render_sidebar, render_viewer_overlay};
use crate::ui::state::{SidebarAction, UIState, ViewerAction};
use crate::viewer::ViewerSelection;
use crate::visualization::earth::BASE_LAYER_TEXTURE;

const NEOWS_HOME: &str = "https://api.nasa.gov/";

/// Sidebar and attribution bar of the impact map screen.
pub fn impact_map_ui_system(
    mut contexts: EguiContexts,
    mut camera: Single<&mut Camera, With<MainCamera>>,
    window: Single<&Window, With<PrimaryWindow>>,
    state: Res<UIState>,
    feed: Res<FeedCatalog>,
    session: Res<ImpactSession>,
    mut messages: MessageWriter<SessionMessage>,
    mut next_screen: ResMut<NextState<AppScreen>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut action = None;
    let left = egui::SidePanel::left("impact_sidebar")
        .resizable(false)
        .exact_width(state.sidebar_width_px)
        .show(ctx, |ui| {
            ui.heading("Asteroid Impact Simulator");
            ui.weak("Project: Impactor-2025");
            ui.separator();
            action = render_sidebar(ui, &feed, &session);
        })
        .response
        .rect
        .width();

    let mut bottom = 0.0;
    if state.show_attribution {
        bottom = egui::TopBottomPanel::bottom("attribution_bar")
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.small("Drag to orbit, scroll to zoom, click the globe to place an impact.");
                    ui.separator();
                    ui.small(format!("Base layer: {}", BASE_LAYER_TEXTURE));
                    ui.separator();
                    ui.hyperlink_to(egui::RichText::new("NEO data: NASA NeoWs").small(), NEOWS_HOME);
                });
            })
            .response
            .rect
            .height();
    }

    match action {
        Some(SidebarAction::Select(id)) => {
            if let Some(record) = feed.records.iter().find(|r| r.id == id) {
                messages.write(SessionMessage::AsteroidSelected(record.clone()));
            }
        }
        Some(SidebarAction::Reset) => {
            messages.write(SessionMessage::ResetRequested);
        }
        Some(SidebarAction::OpenViewer) => next_screen.set(AppScreen::Viewer),
        None => {}
    }

    camera.viewport = if state.crop_3d_viewport_to_ui {
        viewport_beside_panels(window.physical_size(), window.scale_factor(), left, bottom)
    } else {
        None
    };
}

/// Floating info window of the 3D viewer screen.
pub fn viewer_ui_system(
    mut contexts: EguiContexts,
    mut camera: Single<&mut Camera, With<MainCamera>>,
    catalog: Res<BrowseCatalog>,
    mut selection: ResMut<ViewerSelection>,
    mut next_screen: ResMut<NextState<AppScreen>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    if camera.viewport.is_some() {
        camera.viewport = None;
    }

    let current = selection.current(&catalog.records);
    let mut action = None;
    egui::Window::new("Asteroid Viewer")
        .anchor(egui::Align2::LEFT_TOP, [16.0, 16.0])
        .resizable(false)
        .collapsible(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            action = render_viewer_overlay(
                ui,
                &catalog.records,
                current,
                catalog.state.is_loading,
                catalog.state.error.as_deref(),
            );
        });

    match action {
        Some(ViewerAction::Select(id)) => selection.select(&id),
        Some(ViewerAction::BackToMap) => next_screen.set(AppScreen::ImpactMap),
        None => {}
    }
}

/// Physical viewport for the area right of a `left` wide sidebar and above a
/// `bottom` high bar, both in logical pixels.
fn viewport_beside_panels(
    window_size: UVec2,
    scale: f32,
    left: f32,
    bottom: f32,
) -> Option<Viewport> {
    let left = (left * scale) as u32;
    let bottom = (bottom * scale) as u32;
    let width = window_size.x.saturating_sub(left);
    let height = window_size.y.saturating_sub(bottom);
    if width == 0 || height == 0 {
        return None;
    }
    Some(Viewport {
        physical_position: UVec2::new(left, 0),
        physical_size: UVec2::new(width, height),
        ..default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_excludes_sidebar_and_bar() {
        let viewport = viewport_beside_panels(UVec2::new(1280, 720), 1.0, 384.0, 20.0).unwrap();
        assert_eq!(viewport.physical_position, UVec2::new(384, 0));
        assert_eq!(viewport.physical_size, UVec2::new(896, 700));
    }

    #[test]
    fn viewport_scales_logical_panels() {
        let viewport = viewport_beside_panels(UVec2::new(2560, 1440), 2.0, 384.0, 20.0).unwrap();
        assert_eq!(viewport.physical_position, UVec2::new(768, 0));
        assert_eq!(viewport.physical_size, UVec2::new(1792, 1400));
    }

    #[test]
    fn viewport_disappears_when_panels_fill_window() {
        assert!(viewport_beside_panels(UVec2::new(300, 200), 1.0, 384.0, 0.0).is_none());
    }
}
