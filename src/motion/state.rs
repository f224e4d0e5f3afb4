//! Motion domain: the character motion state machine.
//!
//! The simulation owns the authoritative state tag. Transition conditions are
//! evaluated once per fixed tick from the latched input snapshot and contact
//! state; exactly one transition may fire per tick. Enter and exit effects run
//! exactly once per transition, and every transition opens a short blend
//! window during which dispatch already follows the target state.

use bevy::prelude::*;

use crate::motion::body::BodyActuator;
use crate::motion::components::TimingBuffers;
use crate::motion::config::MotionConfig;
use crate::motion::input::InputSnapshot;

/// Axis magnitude below which input is treated as neutral.
pub const INPUT_DEADZONE: f32 = 0.1;

/// The closed set of motion states.
///
/// Idle, walk and run are one `Locomotion` state blended by the continuous
/// normalized speed, so accelerating from stand to run never churns
/// enter/exit callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Motion {
    #[default]
    Locomotion,
    Jump,
    Fall,
    Attack,
    Roll,
    Crouch,
    CrouchWalk,
    ClimbIdle,
    ClimbMove,
}

/// The state machine's per-entity data.
#[derive(Component, Debug, Default)]
pub struct MotionState {
    current: Motion,
    target: Option<Motion>,
    blend_timer: f32,
    /// Seconds spent in the active state
    pub state_time: f32,
    /// Remaining duration of a timed action (attack, roll)
    pub action_timer: f32,
    /// Horizontal direction locked in at roll entry
    pub roll_direction: f32,
}

impl MotionState {
    pub fn current(&self) -> Motion {
        self.current
    }

    pub fn target(&self) -> Option<Motion> {
        self.target
    }

    /// The state whose handler runs this tick: the blend target when one
    /// exists, otherwise the settled current state.
    pub fn active(&self) -> Motion {
        self.target.unwrap_or(self.current)
    }

    /// Opens a blend window toward `to`. The outgoing state stays visible as
    /// `current` until the window closes; dispatch follows `to` immediately.
    pub fn begin_transition(&mut self, to: Motion, blend_time: f32) {
        debug_assert!(to != self.active(), "transition to the active state");
        self.current = self.active();
        self.target = Some(to);
        self.blend_timer = blend_time;
        self.state_time = 0.0;
    }

    pub fn tick_blend(&mut self, dt: f32) {
        if self.target.is_some() {
            self.blend_timer -= dt;
            if self.blend_timer <= 0.0 {
                self.current = self.target.take().unwrap();
                self.blend_timer = 0.0;
            }
        }
    }
}

/// Everything a transition condition may look at besides raw input.
#[derive(Debug, Clone, Copy)]
pub struct TransitionCtx {
    pub grounded: bool,
    pub headroom: bool,
    pub in_climb_zone: bool,
    pub vertical_velocity: f32,
    pub can_jump: bool,
    /// The attack/roll duration has elapsed
    pub action_done: bool,
}

/// The transition table. Returns the state to move to, or `None` to stay.
///
/// Attack and roll pre-empt the regular rows; climb grabs come next; the
/// remaining conditions are per-state.
pub fn next_motion(active: Motion, input: &InputSnapshot, ctx: &TransitionCtx) -> Option<Motion> {
    use Motion::*;

    if input.attack_pressed && matches!(active, Locomotion | Jump | Fall | Crouch | CrouchWalk) {
        return Some(Attack);
    }

    if input.roll_pressed && matches!(active, Locomotion | Crouch | CrouchWalk) {
        return Some(Roll);
    }

    if matches!(active, Locomotion | Jump | Fall)
        && ctx.in_climb_zone
        && input.climb_axis.abs() > INPUT_DEADZONE
    {
        return Some(ClimbIdle);
    }

    match active {
        Locomotion => {
            if ctx.can_jump {
                Some(Jump)
            } else if input.crouch_pressed {
                Some(Crouch)
            } else if !ctx.grounded && ctx.vertical_velocity < 0.0 {
                Some(Fall)
            } else {
                None
            }
        }
        Jump => (ctx.vertical_velocity <= 0.0).then_some(Fall),
        Fall => {
            if ctx.can_jump {
                // Coyote jump: the buffered press is still honored briefly
                // after walking off a ledge, and on the landing tick.
                Some(Jump)
            } else if ctx.grounded {
                Some(if input.crouch_held { Crouch } else { Locomotion })
            } else {
                None
            }
        }
        Attack | Roll => {
            if ctx.action_done {
                Some(if ctx.grounded { Locomotion } else { Fall })
            } else {
                None
            }
        }
        Crouch => {
            if !input.crouch_held && ctx.headroom {
                Some(Locomotion)
            } else if input.horizontal.abs() > INPUT_DEADZONE {
                Some(CrouchWalk)
            } else {
                None
            }
        }
        CrouchWalk => {
            if !input.crouch_held && ctx.headroom {
                Some(Locomotion)
            } else if input.horizontal.abs() <= INPUT_DEADZONE {
                Some(Crouch)
            } else {
                None
            }
        }
        ClimbIdle => {
            if input.jump_pressed || !ctx.in_climb_zone {
                Some(Fall)
            } else if input.climb_axis.abs() > INPUT_DEADZONE {
                Some(ClimbMove)
            } else {
                None
            }
        }
        ClimbMove => {
            if input.jump_pressed || !ctx.in_climb_zone {
                Some(Fall)
            } else if input.climb_axis.abs() <= INPUT_DEADZONE {
                Some(ClimbIdle)
            } else {
                None
            }
        }
    }
}

/// One-time setup on entering a state.
pub fn enter_state(
    to: Motion,
    state: &mut MotionState,
    timing: &mut TimingBuffers,
    body: &mut BodyActuator,
    config: &MotionConfig,
) {
    match to {
        Motion::Jump => {
            body.apply_jump_impulse(config.jump_force);
            timing.consume_jump();
        }
        Motion::Crouch => {
            body.resize_collider(config.crouch_collider.size(), config.crouch_collider.offset());
            body.set_horizontal_velocity(0.0);
        }
        Motion::CrouchWalk => {
            body.resize_collider(config.crouch_collider.size(), config.crouch_collider.offset());
        }
        Motion::ClimbIdle => {
            body.set_gravity_scale(0.0);
            body.set_horizontal_velocity(0.0);
            body.set_vertical_velocity(0.0);
        }
        Motion::ClimbMove => {
            body.set_gravity_scale(0.0);
        }
        Motion::Attack => {
            state.action_timer = config.attack_duration;
        }
        Motion::Roll => {
            state.action_timer = config.roll_duration;
            state.roll_direction = body.facing_direction();
        }
        Motion::Locomotion | Motion::Fall => {}
    }
}

/// Matching teardown on leaving a state.
pub fn exit_state(from: Motion, body: &mut BodyActuator) {
    match from {
        Motion::Crouch | Motion::CrouchWalk => {
            body.restore_collider();
        }
        Motion::ClimbIdle | Motion::ClimbMove => {
            let scale = body.default_gravity_scale();
            body.set_gravity_scale(scale);
        }
        _ => {}
    }
}
