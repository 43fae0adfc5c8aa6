//! Impact simulation for the map screen.

use bevy::prelude::*;

use crate::core::screen::AppScreen;

pub mod estimator;
pub mod format;
pub mod session;
pub mod systems;
pub mod types;

pub use estimator::{EstimateError, estimate_impact};
pub use session::{ImpactSession, SessionMessage};
pub use types::{IMPACT_DISPLAY_RADIUS_M, ImpactEvent, LatLng, ThreatLevel};

pub struct ImpactPlugin;

impl Plugin for ImpactPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ImpactSession>()
            .add_message::<SessionMessage>()
            .add_systems(OnExit(AppScreen::ImpactMap), systems::reset_session)
            .add_systems(
                Update,
                systems::apply_session_messages.run_if(in_state(AppScreen::ImpactMap)),
            );
    }
}
