//! Motion domain: per-tick countdowns for timing buffers, blends, and actions.

use bevy::prelude::*;

use crate::motion::components::{ContactState, Player, TimingBuffers};
use crate::motion::config::MotionConfig;
use crate::motion::input::InputSnapshot;
use crate::motion::state::{Motion, MotionState};

pub(crate) fn update_timers(
    time: Res<Time>,
    config: Res<MotionConfig>,
    snapshot: Res<InputSnapshot>,
    mut query: Query<(&mut TimingBuffers, &mut MotionState, &ContactState), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut timing, mut state, contact) in &mut query {
        timing.update(contact.grounded, snapshot.jump_pressed, dt, &config);

        state.tick_blend(dt);
        state.state_time += dt;

        // Attack/roll run off their configured durations; the countdown
        // reaching zero is what the transition table sees as completion.
        if matches!(state.active(), Motion::Attack | Motion::Roll) && state.action_timer > 0.0 {
            state.action_timer = (state.action_timer - dt).max(0.0);
        }
    }
}
