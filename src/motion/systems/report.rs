//! Motion domain: per-tick outputs for the presentation layer.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::motion::components::{ContactState, MotionReport, Player};
use crate::motion::config::MotionConfig;
use crate::motion::events::MotionTransition;
use crate::motion::input::InputSnapshot;
use crate::motion::state::Motion;

/// Normalized horizontal speed in [0, 1]. Returns 0 rather than NaN when the
/// configured max speed is zero.
pub fn normalized_speed(horizontal_velocity: f32, max_speed: f32) -> f32 {
    if max_speed <= 0.0 {
        return 0.0;
    }
    (horizontal_velocity.abs() / max_speed).clamp(0.0, 1.0)
}

/// Last system of the tick: publish the continuous outputs and the one-shot
/// triggers the presentation layer keys off.
pub(crate) fn publish_report(
    config: Res<MotionConfig>,
    snapshot: Res<InputSnapshot>,
    mut transitions: MessageReader<MotionTransition>,
    mut query: Query<(Entity, &ContactState, &LinearVelocity, &mut MotionReport), With<Player>>,
) {
    let fired: Vec<(Entity, Motion)> = transitions.read().map(|t| (t.entity, t.to)).collect();

    for (entity, contact, velocity, mut report) in &mut query {
        report.normalized_speed = normalized_speed(velocity.x, config.run_speed);
        report.vertical_velocity = velocity.y;
        report.grounded = contact.grounded;

        let entered = |motion: Motion| fired.iter().any(|(e, to)| *e == entity && *to == motion);

        report.jump_requested = entered(Motion::Jump);
        report.attack_requested = entered(Motion::Attack);
        report.roll_requested = entered(Motion::Roll);
        report.crouch_requested = snapshot.crouch_pressed;
        report.crouch_released = snapshot.crouch_released;
    }
}
