//! Motion domain: transition edge notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::motion::state::Motion;

/// Fired exactly once per state transition, on the tick it happens.
/// The presentation layer keys its cross-fades and clip restarts off this.
#[derive(Debug)]
pub struct MotionTransition {
    pub entity: Entity,
    pub from: Motion,
    pub to: Motion,
}

impl Message for MotionTransition {}
