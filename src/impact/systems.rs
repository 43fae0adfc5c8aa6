//! Impact session systems.

use bevy::prelude::*;

use crate::impact::session::{ImpactSession, SessionMessage};

/// Feed every pending map-screen message through the session reducer, in order.
pub fn apply_session_messages(
    mut messages: MessageReader<SessionMessage>,
    mut session: ResMut<ImpactSession>,
) {
    for msg in messages.read() {
        session.apply(msg.clone());
    }
}

/// Leaving the map screen discards the session.
pub fn reset_session(mut session: ResMut<ImpactSession>) {
    session.reset();
}
