//! Animation state machine and playback.
//!
//! Maps the motion core's outputs to a presentation state and advances frame
//! progression. Strictly read-only over the simulation: it consumes the
//! motion tag, the per-tick report, and transition messages, and never writes
//! velocity or collider state.

#![allow(dead_code)]

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::motion::{Motion, MotionConfig, MotionReport, MotionState, MotionTransition, Player};

/// Presentation states for the character.
///
/// Locomotion splits into idle/walk/run here, by normalized speed; the
/// simulation keeps them as one blended state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    Attack,
    Roll,
    Crouch,
    CrouchWalk,
    ClimbIdle,
    ClimbMove,
}

/// Normalized-speed threshold below which locomotion reads as idle.
const IDLE_SPEED_THRESHOLD: f32 = 0.1;
/// Normalized-speed threshold separating walk from run.
const WALK_SPEED_THRESHOLD: f32 = 0.55;

/// Component for animation playback.
#[derive(Component, Debug)]
pub struct AnimationController {
    /// Current animation state.
    pub state: AnimationState,
    /// Previous state (for detecting transitions).
    pub previous_state: AnimationState,
    /// Current frame index (0-based).
    pub current_frame: u32,
    /// Total frames in current animation.
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether the animation should loop.
    pub looping: bool,
    /// Whether the animation has finished (for non-looping).
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            previous_state: AnimationState::Idle,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        }
    }
}

impl AnimationController {
    /// Set the animation state, resetting playback if it changed.
    pub fn set_state(&mut self, state: AnimationState) {
        if self.state == state {
            return;
        }

        self.previous_state = self.state;
        self.state = state;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;

        self.looping = matches!(
            state,
            AnimationState::Idle
                | AnimationState::Walk
                | AnimationState::Run
                | AnimationState::Fall
                | AnimationState::Crouch
                | AnimationState::CrouchWalk
                | AnimationState::ClimbIdle
                | AnimationState::ClimbMove
        );

        self.total_frames = match state {
            AnimationState::Idle => 4,
            AnimationState::Walk => 4,
            AnimationState::Run => 6,
            AnimationState::Jump => 2,
            AnimationState::Fall => 2,
            AnimationState::Attack => 3,
            AnimationState::Roll => 4,
            AnimationState::Crouch => 2,
            AnimationState::CrouchWalk => 4,
            AnimationState::ClimbIdle => 1,
            AnimationState::ClimbMove => 4,
        };

        self.frame_duration = match state {
            AnimationState::Jump | AnimationState::Fall => 0.1,
            _ => 0.15,
        };
    }

    /// Time a non-looping clip so its last frame lands on `duration`.
    pub fn set_clip_duration(&mut self, duration: f32) {
        if self.total_frames > 0 && duration > 0.0 {
            self.frame_duration = duration / self.total_frames as f32;
        }
    }

    /// Sprite-sheet name suffix for the current state.
    pub fn animation_suffix(&self) -> &'static str {
        match self.state {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
            AnimationState::Attack => "attack",
            AnimationState::Roll => "roll",
            AnimationState::Crouch => "crouch",
            AnimationState::CrouchWalk => "crouch_walk",
            AnimationState::ClimbIdle => "climb_idle",
            AnimationState::ClimbMove => "climb_move",
        }
    }
}

/// Message fired when the animation state changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationState,
    pub to: AnimationState,
}

impl Message for AnimationStateChanged {}

/// Message fired when a non-looping animation completes.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub state: AnimationState,
}

impl Message for AnimationFinished {}

/// Choose the presentation state for a motion tag. During a blend the target
/// is already what dispatch follows, so presentation follows it too.
pub fn animation_for(motion: Motion, report: &MotionReport) -> AnimationState {
    match motion {
        Motion::Locomotion => {
            if report.normalized_speed < IDLE_SPEED_THRESHOLD {
                AnimationState::Idle
            } else if report.normalized_speed < WALK_SPEED_THRESHOLD {
                AnimationState::Walk
            } else {
                AnimationState::Run
            }
        }
        Motion::Jump => AnimationState::Jump,
        Motion::Fall => AnimationState::Fall,
        Motion::Attack => AnimationState::Attack,
        Motion::Roll => AnimationState::Roll,
        Motion::Crouch => AnimationState::Crouch,
        Motion::CrouchWalk => AnimationState::CrouchWalk,
        Motion::ClimbIdle => AnimationState::ClimbIdle,
        Motion::ClimbMove => AnimationState::ClimbMove,
    }
}

/// System that drives the animation state from the motion core's outputs.
pub(crate) fn drive_animation_state(
    config: Res<MotionConfig>,
    mut transitions: MessageReader<MotionTransition>,
    mut changed: MessageWriter<AnimationStateChanged>,
    mut query: Query<(Entity, &MotionState, &MotionReport, &mut AnimationController), With<Player>>,
) {
    // Several fixed ticks can elapse per rendered frame, so the simulation may
    // have left and re-entered a state between reads (attack -> locomotion ->
    // attack). The transition messages force a clip restart in that case.
    let restarted: Vec<Entity> = transitions.read().map(|t| t.entity).collect();

    for (entity, motion, report, mut controller) in &mut query {
        let next = animation_for(motion.active(), report);
        let previous = controller.state;

        if restarted.contains(&entity) && controller.state == next {
            controller.current_frame = 0;
            controller.frame_timer = 0.0;
            controller.finished = false;
        }

        controller.set_state(next);

        // Non-looping action clips end exactly when the simulation's action
        // timer does, keeping both layers in agreement about completion.
        match controller.state {
            AnimationState::Attack => controller.set_clip_duration(config.attack_duration),
            AnimationState::Roll => controller.set_clip_duration(config.roll_duration),
            _ => {}
        }

        if controller.state != previous {
            changed.write(AnimationStateChanged {
                entity,
                from: previous,
                to: controller.state,
            });
        }
    }
}

/// System that updates animation frames based on time.
pub(crate) fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished_messages: MessageWriter<AnimationFinished>,
) {
    for (entity, mut controller) in &mut query {
        if controller.finished {
            continue;
        }

        controller.frame_timer += time.delta_secs();

        if controller.frame_timer >= controller.frame_duration {
            controller.frame_timer -= controller.frame_duration;
            controller.current_frame += 1;

            if controller.current_frame >= controller.total_frames {
                if controller.looping {
                    controller.current_frame = 0;
                } else {
                    controller.current_frame = controller.total_frames - 1;
                    controller.finished = true;
                    finished_messages.write(AnimationFinished {
                        entity,
                        state: controller.state,
                    });
                }
            }
        }
    }
}
