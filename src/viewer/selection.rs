//! Which browse record the viewer shows.

use bevy::prelude::*;

use crate::neo::{AsteroidRecord, BrowseCatalog};

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ViewerSelection {
    pub selected_id: Option<String>,
}

impl ViewerSelection {
    /// The selected record, if it is in `records`.
    pub fn current<'a>(&self, records: &'a [AsteroidRecord]) -> Option<&'a AsteroidRecord> {
        let id = self.selected_id.as_deref()?;
        records.iter().find(|r| r.id == id)
    }

    pub fn select(&mut self, id: &str) {
        if self.selected_id.as_deref() != Some(id) {
            self.selected_id = Some(id.to_string());
        }
    }
}

/// Once the browse list arrives, show its first object.
pub fn default_to_first(catalog: Res<BrowseCatalog>, mut selection: ResMut<ViewerSelection>) {
    if selection.current(&catalog.records).is_some() {
        return;
    }
    if let Some(first) = catalog.records.first() {
        debug!("[VIEWER] defaulting to {}", first.name);
        selection.select(&first.id);
    }
}

pub fn reset_selection(mut selection: ResMut<ViewerSelection>) {
    *selection = ViewerSelection::default();
}
