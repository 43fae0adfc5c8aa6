//! Top-level screens of the application.

use bevy::prelude::*;

/// The two screens the user moves between.
///
/// Entering a screen mounts it: its scene is spawned fresh (with
/// `DespawnOnExit`) and its data is fetched again.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppScreen {
    #[default]
    ImpactMap,
    Viewer,
}
