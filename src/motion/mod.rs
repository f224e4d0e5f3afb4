//! Motion domain: the character-motion simulation core.
//!
//! One chained pipeline per fixed tick: latch input, sense contacts, update
//! timing buffers, evaluate state transitions, dispatch per-state physics,
//! publish outputs. Mutation is sequential by construction; the presentation
//! layer only ever reads the [`MotionReport`] outputs and [`MotionTransition`]
//! messages.

mod body;
mod components;
mod config;
mod events;
mod input;
mod spawn;
mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use body::{BodyActuator, BodyState};
pub use components::{
    Climbable, ContactState, GameLayer, Ground, MotionReport, Player, TimingBuffers, Wall,
};
pub use config::{ColliderDef, MotionConfig};
pub use events::MotionTransition;
pub use input::InputSnapshot;
pub use state::{INPUT_DEADZONE, Motion, MotionState};

use bevy::prelude::*;

use crate::core::GameState;
use crate::motion::config::load_motion_config;
use crate::motion::input::{RawInput, latch_input, sample_input};
use crate::motion::spawn::spawn_player;
use crate::motion::systems::{
    detect_climb_regions, detect_ground, detect_headroom, dispatch_motion, evaluate_transitions,
    publish_report, update_timers,
};

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RawInput>()
            .init_resource::<InputSnapshot>()
            .init_resource::<MotionConfig>()
            .add_message::<MotionTransition>()
            .add_systems(Startup, load_motion_config)
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(Update, sample_input.run_if(in_state(GameState::Run)))
            .add_systems(
                FixedUpdate,
                (
                    latch_input,
                    detect_ground,
                    detect_headroom,
                    detect_climb_regions,
                    update_timers,
                    evaluate_transitions,
                    dispatch_motion,
                    publish_report,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(OnEnter(GameState::Run), spawn::spawn_test_room);
    }
}
