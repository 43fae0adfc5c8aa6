//! UI panel components and utilities
use bevy_egui::egui::{self, Color32, RichText};

use crate::impact::format::{kilometers, to_fixed};
use crate::impact::{ImpactEvent, ImpactSession};
use crate::neo::{AsteroidRecord, FeedCatalog};
use crate::ui::state::{SidebarAction, ViewerAction};

const ACCENT: Color32 = Color32::from_rgb(34, 211, 238);
const DANGER: Color32 = Color32::from_rgb(248, 113, 113);
const SAFE: Color32 = Color32::from_rgb(74, 222, 128);
const WARN: Color32 = Color32::from_rgb(250, 204, 21);
const DIM: Color32 = Color32::from_rgb(156, 163, 175);

pub const PLACEHOLDER_TITLE: &str = "Click on the map to simulate an impact.";
pub const PLACEHOLDER_BODY: &str =
    "The sidebar will populate with real data from a selected Near-Earth Object.";

/// Second line of an asteroid list row.
pub fn list_row_summary(record: &AsteroidRecord) -> String {
    let velocity = record
        .first_close_approach()
        .and_then(|a| a.velocity_km_s())
        .map(|v| to_fixed(v, 1))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "Size: {} m | Velocity: {} km/s",
        to_fixed(record.diameter_max_m(), 0),
        velocity
    )
}

pub fn current_asteroid_header(session: &ImpactSession) -> String {
    let name = session
        .selected
        .as_ref()
        .map(|r| r.display_name())
        .unwrap_or_default();
    format!("current asteroid: {}", name)
}

/// Map-screen sidebar below the title.
pub fn render_sidebar(
    ui: &mut egui::Ui,
    feed: &FeedCatalog,
    session: &ImpactSession,
) -> Option<SidebarAction> {
    if feed.state.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Fetching NEO Data...");
        });
        return None;
    }
    if let Some(error) = &feed.state.error {
        ui.colored_label(DANGER, format!("Error: {}", error));
        return None;
    }

    let mut action = None;

    if session.show_asteroid_list {
        ui.label("Select an asteroid:");
        action = render_asteroid_list(ui, &feed.records, session);
    }

    ui.add_space(8.0);
    if ui
        .link(RichText::new("Inspect asteroids in 3D").color(ACCENT))
        .clicked()
    {
        action = Some(SidebarAction::OpenViewer);
    }
    ui.add_space(8.0);

    if let Some(error) = &session.last_error {
        ui.colored_label(WARN, error);
    }

    match &session.impact {
        Some(impact) => {
            if let Some(reset) = render_impact_details(ui, impact) {
                action = Some(reset);
            }
        }
        None => render_placeholder(ui),
    }
    action
}

fn render_asteroid_list(
    ui: &mut egui::Ui,
    records: &[AsteroidRecord],
    session: &ImpactSession,
) -> Option<SidebarAction> {
    let mut action = None;
    ui.strong(current_asteroid_header(session));

    egui::ScrollArea::vertical()
        .max_height(384.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for record in records {
                let selected = session.selected_id() == Some(record.id.as_str());
                let text = format!("{}\n{}", record.display_name(), list_row_summary(record));
                if ui.selectable_label(selected, text).clicked() {
                    action = Some(SidebarAction::Select(record.id.clone()));
                }
                if record.is_potentially_hazardous_asteroid {
                    ui.small(RichText::new("⚠ Hazardous").color(DANGER));
                }
                ui.add_space(4.0);
            }
        });

    if session.selected.is_some() {
        ui.colored_label(SAFE, "Click anywhere on the map to simulate impact");
    }
    action
}

fn render_placeholder(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(PLACEHOLDER_TITLE);
            ui.add_space(4.0);
            ui.small(RichText::new(PLACEHOLDER_BODY).color(DIM));
        });
    });
}

fn stat(ui: &mut egui::Ui, label: &str, value: impl Into<String>, color: Color32) {
    ui.label(RichText::new(format!("{}:", label)).color(DIM));
    ui.colored_label(color, value.into());
    ui.end_row();
}

fn section(ui: &mut egui::Ui, title: &str, add_rows: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).heading().color(ACCENT));
        egui::Grid::new(title)
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, add_rows);
    });
    ui.add_space(6.0);
}

/// The three report sections and the reset button.
fn render_impact_details(ui: &mut egui::Ui, impact: &ImpactEvent) -> Option<SidebarAction> {
    let source = &impact.details.source;
    let consequences = &impact.details.consequences;
    let mitigation = &impact.details.mitigation;
    let text = Color32::WHITE;
    let mut action = None;

    egui::ScrollArea::vertical()
        .id_salt("impact_details")
        .show(ui, |ui| {
            section(ui, "Target Object Data", |ui| {
                stat(ui, "Name", &source.name, text);
                stat(ui, "Est. Diameter", &source.diameter, text);
                stat(ui, "Relative Velocity", &source.velocity, text);
                stat(ui, "Close Approach", &source.close_approach_date, text);
                stat(ui, "Miss Distance", &source.miss_distance, text);
                stat(ui, "Abs. Magnitude (H)", &source.absolute_magnitude, text);
                let (hazard, color) = if source.is_potentially_hazardous {
                    ("Yes", DANGER)
                } else {
                    ("No", SAFE)
                };
                stat(ui, "Potentially Hazardous", hazard, color);
            });
            if !source.jpl_url.is_empty() {
                ui.hyperlink_to(
                    RichText::new("View on JPL Database").color(ACCENT),
                    &source.jpl_url,
                );
                ui.add_space(6.0);
            }

            section(ui, "Predicted Consequences", |ui| {
                stat(ui, "Impact Location", impact.position.to_string(), text);
                stat(ui, "Kinetic Energy", &consequences.impact_energy, text);
                stat(ui, "Seismic Effect", &consequences.seismic_effect, text);
                stat(ui, "Air Blast", &consequences.air_blast, text);
            });

            section(ui, "Mitigation Report", |ui| {
                let threat_color = if source.is_potentially_hazardous {
                    WARN
                } else {
                    DIM
                };
                stat(ui, "Threat Level", mitigation.threat_level.to_string(), threat_color);
                stat(ui, "Recommended Action", &mitigation.recommended_action, text);
            });

            ui.vertical_centered(|ui| {
                if ui.button("Reset Simulation").clicked() {
                    action = Some(SidebarAction::Reset);
                }
            });
        });
    action
}

/// Info lines for the viewer overlay, below the name.
pub fn viewer_info_lines(record: &AsteroidRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Magnitude: {}", record.absolute_magnitude_h),
        format!(
            "Diameter: {} - {} m",
            to_fixed(record.diameter_min_m(), 1),
            to_fixed(record.diameter_max_m(), 1)
        ),
        format!(
            "Hazardous: {}",
            if record.is_potentially_hazardous_asteroid {
                "Yes"
            } else {
                "No"
            }
        ),
    ];
    if let Some(approach) = record.first_close_approach() {
        lines.push("Next Close Approach:".to_string());
        lines.push(approach.display_date().to_string());
        lines.push(match approach.velocity_km_s() {
            Some(v) => format!("Velocity: {} km/s", to_fixed(v, 2)),
            None => format!("Velocity: {} km/s", approach.relative_velocity.kilometers_per_second),
        });
        lines.push(match approach.miss_distance_km() {
            Some(km) => format!("Miss Distance: {}", kilometers(km)),
            None => format!("Miss Distance: {} km", approach.miss_distance.kilometers),
        });
    }
    lines
}

pub fn render_viewer_overlay(
    ui: &mut egui::Ui,
    records: &[AsteroidRecord],
    current: Option<&AsteroidRecord>,
    is_loading: bool,
    error: Option<&str>,
) -> Option<ViewerAction> {
    let mut action = None;

    if is_loading {
        ui.colored_label(DIM, "Loading asteroid data...");
    } else if let Some(record) = current {
        ui.label(RichText::new("Select Asteroid").color(DIM));
        egui::ComboBox::from_id_salt("asteroid_select")
            .width(ui.available_width())
            .selected_text(&record.name)
            .show_ui(ui, |ui| {
                for candidate in records {
                    if ui
                        .selectable_label(candidate.id == record.id, &candidate.name)
                        .clicked()
                    {
                        action = Some(ViewerAction::Select(candidate.id.clone()));
                    }
                }
            });

        ui.add_space(8.0);
        ui.heading(&record.name);
        for line in viewer_info_lines(record) {
            if line.ends_with(':') {
                ui.add_space(4.0);
                ui.strong(line);
            } else {
                ui.label(line);
            }
        }
    } else {
        ui.colored_label(DANGER, "Failed to load asteroid data.");
        if let Some(error) = error {
            ui.small(RichText::new(error).color(DIM));
        }
    }

    ui.separator();
    if ui.button("Back to impact map").clicked() {
        action = Some(ViewerAction::BackToMap);
    }
    action
}
