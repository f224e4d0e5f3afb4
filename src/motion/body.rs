//! Motion domain: the single owner of body-level physical state.
//!
//! Every write to the rigid body (velocity, gravity scale, collider shape,
//! facing) goes through [`BodyActuator`]. Other systems read facing and
//! velocity through its accessors and never cache them across a flip.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::config::MotionConfig;

/// Authoritative body-level state: facing plus the collider dimensions
/// captured at spawn, which `restore_collider` must reproduce exactly.
#[derive(Component, Debug)]
pub struct BodyState {
    pub facing_right: bool,
    pub normal_size: Vec2,
    pub normal_offset: Vec2,
    pub collider_size: Vec2,
    pub collider_offset: Vec2,
    pub default_gravity_scale: f32,
}

impl BodyState {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            facing_right: true,
            normal_size: config.normal_collider.size(),
            normal_offset: config.normal_collider.offset(),
            collider_size: config.normal_collider.size(),
            collider_offset: config.normal_collider.offset(),
            default_gravity_scale: config.default_gravity_scale,
        }
    }

    pub fn facing_direction(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }
}

/// Borrowed view over one body's components for the duration of a tick.
///
/// If the player entity has been despawned the owning query simply yields
/// nothing, so driving the pipeline through a death sequence is a no-op
/// rather than an error.
pub struct BodyActuator<'a> {
    state: &'a mut BodyState,
    velocity: &'a mut LinearVelocity,
    gravity: &'a mut GravityScale,
    collider: &'a mut Collider,
    sprite: Option<&'a mut Sprite>,
}

impl<'a> BodyActuator<'a> {
    pub fn new(
        state: &'a mut BodyState,
        velocity: &'a mut LinearVelocity,
        gravity: &'a mut GravityScale,
        collider: &'a mut Collider,
        sprite: Option<&'a mut Sprite>,
    ) -> Self {
        Self {
            state,
            velocity,
            gravity,
            collider,
            sprite,
        }
    }

    pub fn set_horizontal_velocity(&mut self, v: f32) {
        self.velocity.x = v;
    }

    pub fn set_vertical_velocity(&mut self, v: f32) {
        self.velocity.y = v;
    }

    pub fn add_velocity(&mut self, dx: f32, dy: f32) {
        self.velocity.x += dx;
        self.velocity.y += dy;
    }

    /// Sets vertical velocity to the jump force, preserving horizontal.
    pub fn apply_jump_impulse(&mut self, force: f32) {
        self.velocity.y = force;
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity.0 = scale;
    }

    pub fn resize_collider(&mut self, size: Vec2, offset: Vec2) {
        self.state.collider_size = size;
        self.state.collider_offset = offset;
        *self.collider = build_collider(size, offset);
    }

    /// Restores the exact size/offset captured at spawn.
    pub fn restore_collider(&mut self) {
        let size = self.state.normal_size;
        let offset = self.state.normal_offset;
        self.resize_collider(size, offset);
    }

    /// Toggles facing and mirrors the sprite. The authoritative flag and the
    /// visual flip change together; callers re-read `facing_right()` instead
    /// of holding a copy.
    pub fn flip(&mut self) {
        self.state.facing_right = !self.state.facing_right;
        if let Some(sprite) = self.sprite.as_deref_mut() {
            sprite.flip_x = !self.state.facing_right;
        }
    }

    pub fn facing_right(&self) -> bool {
        self.state.facing_right
    }

    pub fn facing_direction(&self) -> f32 {
        self.state.facing_direction()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    pub fn default_gravity_scale(&self) -> f32 {
        self.state.default_gravity_scale
    }
}

/// A plain rectangle when centered, a compound with one offset rectangle
/// otherwise (the crouch collider sits lower so the feet stay planted).
pub(crate) fn build_collider(size: Vec2, offset: Vec2) -> Collider {
    if offset == Vec2::ZERO {
        Collider::rectangle(size.x, size.y)
    } else {
        Collider::compound(vec![(offset, 0.0, Collider::rectangle(size.x, size.y))])
    }
}
