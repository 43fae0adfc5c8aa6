//! NASA NeoWs integration (browse + feed).

use bevy::prelude::*;

use crate::core::screen::AppScreen;

pub mod error;
pub mod fetcher;
pub mod settings;
pub mod systems;
pub mod types;

pub use error::NeoError;
pub use settings::NeoConfig;
pub use types::{AsteroidRecord, BrowseCatalog, FeedCatalog};

/// Plugin for NeoWs data management.
pub struct NeoPlugin;

impl Plugin for NeoPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(NeoConfig::load())
            .init_resource::<FeedCatalog>()
            .init_resource::<BrowseCatalog>()
            .init_resource::<types::NeoRequestCounter>()
            .add_systems(PreStartup, systems::setup_neo_worker)
            .add_systems(OnEnter(AppScreen::ImpactMap), systems::request_feed)
            .add_systems(OnExit(AppScreen::ImpactMap), systems::clear_feed)
            .add_systems(OnEnter(AppScreen::Viewer), systems::request_browse)
            .add_systems(OnExit(AppScreen::Viewer), systems::clear_browse)
            .add_systems(Update, systems::apply_neo_results);
    }
}
