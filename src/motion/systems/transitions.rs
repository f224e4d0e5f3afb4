//! Motion domain: transition evaluation for the state machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::motion::body::{BodyActuator, BodyState};
use crate::motion::components::{ContactState, Player, TimingBuffers};
use crate::motion::config::MotionConfig;
use crate::motion::events::MotionTransition;
use crate::motion::input::InputSnapshot;
use crate::motion::state::{MotionState, TransitionCtx, enter_state, exit_state, next_motion};

/// Evaluates the transition table once per tick. When a transition fires, the
/// outgoing state's teardown and the incoming state's setup each run exactly
/// once, and a [`MotionTransition`] message is emitted for the presentation
/// layer.
pub(crate) fn evaluate_transitions(
    config: Res<MotionConfig>,
    snapshot: Res<InputSnapshot>,
    mut transitions: MessageWriter<MotionTransition>,
    mut query: Query<
        (
            Entity,
            &mut MotionState,
            &mut TimingBuffers,
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
    for (
        entity,
        mut state,
        mut timing,
        contact,
        mut body_state,
        mut velocity,
        mut gravity,
        mut collider,
        mut sprite,
    ) in &mut query
    {
        let ctx = TransitionCtx {
            grounded: contact.grounded,
            headroom: contact.headroom,
            in_climb_zone: contact.in_climb_zone,
            vertical_velocity: velocity.y,
            can_jump: timing.can_jump(),
            action_done: state.action_timer <= 0.0,
        };

        let from = state.active();
        let Some(to) = next_motion(from, &snapshot, &ctx) else {
            continue;
        };

        let mut body = BodyActuator::new(
            &mut body_state,
            &mut velocity,
            &mut gravity,
            &mut collider,
            Some(&mut sprite),
        );

        exit_state(from, &mut body);
        state.begin_transition(to, config.state_blend_time);
        enter_state(to, &mut state, &mut timing, &mut body, &config);

        debug!("Motion transition: {:?} -> {:?}", from, to);
        transitions.write(MotionTransition { entity, from, to });
    }
}
