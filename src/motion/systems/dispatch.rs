//! Motion domain: per-state physics dispatch.
//!
//! Runs after transition evaluation each fixed tick and is the only writer of
//! velocity. The handler is chosen from the blend target when a transition is
//! mid-blend, so a fresh state's velocity applies on the very tick it fires.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::body::{BodyActuator, BodyState};
use crate::motion::components::{ContactState, Player};
use crate::motion::config::MotionConfig;
use crate::motion::input::InputSnapshot;
use crate::motion::state::{INPUT_DEADZONE, Motion, MotionState};

/// Air control fraction of run speed while jumping or falling
const AIR_CONTROL_FACTOR: f32 = 0.8;
/// Air control fraction of run speed during an airborne attack
const ATTACK_AIR_CONTROL_FACTOR: f32 = 0.5;

pub(crate) fn dispatch_motion(
    config: Res<MotionConfig>,
    snapshot: Res<InputSnapshot>,
    mut query: Query<
        (
            &MotionState,
            &ContactState,
            &mut BodyState,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Collider,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    for (state, contact, mut body_state, mut velocity, mut gravity, mut collider, mut sprite) in
        &mut query
    {
        let mut body = BodyActuator::new(
            &mut body_state,
            &mut velocity,
            &mut gravity,
            &mut collider,
            Some(&mut sprite),
        );

        apply_state_physics(
            state.active(),
            state,
            contact.grounded,
            &snapshot,
            &config,
            &mut body,
        );
    }
}

/// The per-state velocity handler. Exhaustive over the closed state set, so a
/// state with no handler cannot compile.
pub(crate) fn apply_state_physics(
    active: Motion,
    state: &MotionState,
    grounded: bool,
    snapshot: &InputSnapshot,
    config: &MotionConfig,
    body: &mut BodyActuator,
) {
    match active {
        Motion::Locomotion => {
            steer(body, snapshot, config.run_speed);
        }
        Motion::Jump | Motion::Fall => {
            steer(body, snapshot, config.run_speed * AIR_CONTROL_FACTOR);
        }
        Motion::Attack => {
            if grounded {
                // Grounded attacks stay anchored
                body.set_horizontal_velocity(0.0);
            } else {
                steer(body, snapshot, config.run_speed * ATTACK_AIR_CONTROL_FACTOR);
            }
        }
        Motion::Roll => {
            // Input is ignored; direction was locked at roll entry
            body.set_horizontal_velocity(state.roll_direction * config.roll_speed);
        }
        Motion::Crouch => {
            if snapshot.horizontal.abs() > INPUT_DEADZONE {
                // Ramping up here is what drives Crouch -> CrouchWalk on the
                // next evaluation
                steer(body, snapshot, config.crouch_speed);
            } else {
                body.set_horizontal_velocity(0.0);
            }
        }
        Motion::CrouchWalk => {
            steer(body, snapshot, config.crouch_speed);
        }
        Motion::ClimbIdle => {
            body.set_vertical_velocity(0.0);
        }
        Motion::ClimbMove => {
            body.set_vertical_velocity(snapshot.climb_axis * config.climb_speed);
        }
    }
}

/// Shared horizontal handler: set velocity toward the input at `speed` and
/// flip when the input sign disagrees with facing. Facing is re-read from the
/// actuator after a flip, never from a cached copy.
fn steer(body: &mut BodyActuator, snapshot: &InputSnapshot, speed: f32) {
    let horizontal = snapshot.horizontal;

    if horizontal.abs() > INPUT_DEADZONE {
        if horizontal > 0.0 && !body.facing_right() {
            body.flip();
        } else if horizontal < 0.0 && body.facing_right() {
            body.flip();
        }
        body.set_horizontal_velocity(horizontal * speed);
    } else {
        body.set_horizontal_velocity(0.0);
    }
}
