//! Motion domain: input sampling and per-tick snapshots.
//!
//! Press/release edges are read per rendered frame (that is where
//! `just_pressed` lives), accumulated in [`RawInput`], and latched into the
//! authoritative [`InputSnapshot`] exactly once at the top of each fixed tick.
//! An edge flag is therefore true for exactly one tick no matter how frame
//! and tick rates line up.

use bevy::prelude::*;

/// Edge accumulator filled in `Update`, drained at the start of each tick.
#[derive(Resource, Debug, Default)]
pub struct RawInput {
    pub horizontal: f32,
    pub climb_axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub attack_pressed: bool,
    pub roll_pressed: bool,
    pub crouch_pressed: bool,
    pub crouch_released: bool,
    pub crouch_held: bool,
}

/// The input state the simulation sees for one fixed tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputSnapshot {
    /// Horizontal axis in [-1, 1]
    pub horizontal: f32,
    /// Vertical/climb axis in [-1, 1]
    pub climb_axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub attack_pressed: bool,
    pub roll_pressed: bool,
    pub crouch_pressed: bool,
    pub crouch_released: bool,
    pub crouch_held: bool,
}

pub(crate) fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut raw: ResMut<RawInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Climb axis
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    raw.horizontal = x;
    raw.climb_axis = y;

    // Edges accumulate until the next tick latches them
    raw.jump_pressed |=
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    raw.attack_pressed |=
        keyboard.just_pressed(KeyCode::KeyJ) || keyboard.just_pressed(KeyCode::KeyX);
    raw.roll_pressed |=
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyL);
    raw.crouch_pressed |=
        keyboard.just_pressed(KeyCode::KeyC) || keyboard.just_pressed(KeyCode::ControlLeft);
    raw.crouch_released |=
        keyboard.just_released(KeyCode::KeyC) || keyboard.just_released(KeyCode::ControlLeft);

    raw.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    raw.crouch_held = keyboard.pressed(KeyCode::KeyC) || keyboard.pressed(KeyCode::ControlLeft);
}

/// First system of the fixed tick: publish the accumulated input as this
/// tick's snapshot and clear the edge flags.
pub(crate) fn latch_input(mut raw: ResMut<RawInput>, mut snapshot: ResMut<InputSnapshot>) {
    snapshot.horizontal = raw.horizontal;
    snapshot.climb_axis = raw.climb_axis;
    snapshot.jump_pressed = raw.jump_pressed;
    snapshot.jump_held = raw.jump_held;
    snapshot.attack_pressed = raw.attack_pressed;
    snapshot.roll_pressed = raw.roll_pressed;
    snapshot.crouch_pressed = raw.crouch_pressed;
    snapshot.crouch_released = raw.crouch_released;
    snapshot.crouch_held = raw.crouch_held;

    raw.jump_pressed = false;
    raw.attack_pressed = false;
    raw.roll_pressed = false;
    raw.crouch_pressed = false;
    raw.crouch_released = false;
}
