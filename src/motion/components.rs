//! Motion domain: components, physics layers, and world markers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::config::MotionConfig;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Climbable regions (ladders, ropes) - sensors, never block movement
    Climb,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for climbable sensor regions
#[derive(Component, Debug)]
pub struct Climbable;

/// Per-tick contact sensing results for the player body.
#[derive(Component, Debug, Default)]
pub struct ContactState {
    pub grounded: bool,
    pub was_grounded: bool,
    /// Standing clearance above the crouched collider
    pub headroom: bool,
    pub in_climb_zone: bool,
}

/// Coyote-time and jump-buffer countdowns.
///
/// Both counters are clamped at zero. A jump is permitted only while both are
/// strictly positive, and firing one must consume both on the same tick so a
/// single buffered press can never produce two jumps.
#[derive(Component, Debug, Default)]
pub struct TimingBuffers {
    pub coyote: f32,
    pub jump_buffer: f32,
}

impl TimingBuffers {
    pub fn update(&mut self, grounded: bool, jump_pressed: bool, dt: f32, config: &MotionConfig) {
        if grounded {
            self.coyote = config.coyote_time;
        } else {
            self.coyote = (self.coyote - dt).max(0.0);
        }

        if jump_pressed {
            self.jump_buffer = config.jump_buffer_time;
        } else {
            self.jump_buffer = (self.jump_buffer - dt).max(0.0);
        }
    }

    pub fn can_jump(&self) -> bool {
        self.coyote > 0.0 && self.jump_buffer > 0.0
    }

    /// Called exactly once per fired jump.
    pub fn consume_jump(&mut self) {
        self.coyote = 0.0;
        self.jump_buffer = 0.0;
    }
}

/// Per-tick outputs exposed to the presentation layer.
///
/// Presentation reads these (plus the motion state tag) to choose what to
/// render; it never writes back into the simulation.
#[derive(Component, Debug, Default)]
pub struct MotionReport {
    /// |vx| / run_speed, clamped to [0, 1]
    pub normalized_speed: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub jump_requested: bool,
    pub attack_requested: bool,
    pub roll_requested: bool,
    pub crouch_requested: bool,
    pub crouch_released: bool,
}
