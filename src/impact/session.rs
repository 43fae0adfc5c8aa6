//! Impact-map session: the selected object and the current impact.

use bevy::prelude::*;

use crate::impact::estimator::estimate_impact;
use crate::impact::types::{ImpactEvent, LatLng};
use crate::neo::AsteroidRecord;

/// Everything the map screen's sidebar and globe read from.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ImpactSession {
    pub selected: Option<AsteroidRecord>,
    pub impact: Option<ImpactEvent>,
    pub show_asteroid_list: bool,
    /// Why the last click produced no impact, when a record was unusable.
    pub last_error: Option<String>,
}

impl Default for ImpactSession {
    fn default() -> Self {
        Self {
            selected: None,
            impact: None,
            show_asteroid_list: true,
            last_error: None,
        }
    }
}

/// User intents on the map screen.
#[derive(Message, Debug, Clone)]
pub enum SessionMessage {
    AsteroidSelected(AsteroidRecord),
    MapClicked(LatLng),
    ResetRequested,
}

impl ImpactSession {
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(|r| r.id.as_str())
    }

    pub fn apply(&mut self, msg: SessionMessage) {
        match msg {
            SessionMessage::AsteroidSelected(record) => self.select(record),
            SessionMessage::MapClicked(position) => self.click(position),
            SessionMessage::ResetRequested => self.reset(),
        }
    }

    /// Selecting keeps any impact already on the map.
    pub fn select(&mut self, record: AsteroidRecord) {
        if self.selected_id() == Some(record.id.as_str()) {
            return;
        }
        info!("[IMPACT] selected {}", record.display_name());
        self.selected = Some(record);
        self.last_error = None;
    }

    pub fn click(&mut self, position: LatLng) {
        let Some(record) = self.selected.as_ref() else {
            debug!("[IMPACT] map click at {} ignored, nothing selected", position);
            return;
        };

        match estimate_impact(record, position) {
            Ok(event) => {
                info!(
                    "[IMPACT] {} at {}: {}",
                    event.details.source.name, position, event.details.consequences.impact_energy
                );
                self.impact = Some(event);
                self.show_asteroid_list = false;
                self.last_error = None;
            }
            Err(err) => {
                warn!("[IMPACT] cannot simulate impact: {}", err);
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neo::types::test_support::record;

    #[test]
    fn starts_with_list_visible_and_nothing_selected() {
        let session = ImpactSession::default();
        assert!(session.selected.is_none());
        assert!(session.impact.is_none());
        assert!(session.show_asteroid_list);
    }

    #[test]
    fn click_without_selection_is_a_no_op() {
        let mut session = ImpactSession::default();
        session.apply(SessionMessage::MapClicked(LatLng::new(20.0, 0.0)));
        assert_eq!(session, ImpactSession::default());
    }

    #[test]
    fn click_with_selection_creates_impact_and_hides_list() {
        let mut session = ImpactSession::default();
        session.apply(SessionMessage::AsteroidSelected(record("1", "(2025 AB)", 340.0, "20")));
        session.apply(SessionMessage::MapClicked(LatLng::new(20.0, 5.0)));

        let impact = session.impact.as_ref().unwrap();
        assert_eq!(impact.position, LatLng::new(20.0, 5.0));
        assert_eq!(impact.details.source.name, "2025 AB");
        assert!(!session.show_asteroid_list);
    }

    #[test]
    fn second_click_replaces_impact() {
        let mut session = ImpactSession::default();
        session.select(record("1", "A", 340.0, "20"));
        session.click(LatLng::new(1.0, 1.0));
        session.click(LatLng::new(2.0, 2.0));
        assert_eq!(session.impact.unwrap().position, LatLng::new(2.0, 2.0));
    }

    #[test]
    fn reselecting_same_id_is_idempotent() {
        let mut session = ImpactSession::default();
        session.select(record("1", "A", 340.0, "20"));
        let before = session.clone();
        session.select(record("1", "A", 340.0, "20"));
        assert_eq!(session, before);
    }

    #[test]
    fn selecting_keeps_existing_impact() {
        let mut session = ImpactSession::default();
        session.select(record("1", "A", 340.0, "20"));
        session.click(LatLng::new(1.0, 1.0));
        session.select(record("2", "B", 10.0, "5"));
        assert_eq!(session.selected_id(), Some("2"));
        assert_eq!(session.impact.as_ref().unwrap().details.source.name, "A");
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = ImpactSession::default();
        session.select(record("1", "A", 340.0, "20"));
        session.click(LatLng::new(1.0, 1.0));
        session.apply(SessionMessage::ResetRequested);
        assert!(session.selected.is_none());
        assert!(session.impact.is_none());
        assert!(session.show_asteroid_list);
    }

    #[test]
    fn malformed_record_keeps_previous_state() {
        let mut session = ImpactSession::default();
        session.select(record("1", "A", 340.0, "20"));
        session.click(LatLng::new(1.0, 1.0));
        let previous = session.impact.clone();

        let mut broken = record("2", "Broken", 10.0, "5");
        broken.close_approach_data.clear();
        session.select(broken);
        session.click(LatLng::new(3.0, 3.0));

        assert_eq!(session.impact, previous);
        assert!(session.last_error.as_deref().unwrap().contains("Broken"));
    }
}
