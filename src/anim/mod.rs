//! Animation presentation layer.
//!
//! Reads the motion core's state tag, per-tick report, and transition
//! messages to select and advance character animations. Never writes back
//! into the simulation.

mod animation;


pub use animation::{
    AnimationController, AnimationFinished, AnimationState, AnimationStateChanged, animation_for,
};

use bevy::prelude::*;

use crate::anim::animation::{drive_animation_state, update_animation_frames};

pub struct AnimPlugin;

impl Plugin for AnimPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationStateChanged>()
            .add_message::<AnimationFinished>()
            .add_systems(
                Update,
                (drive_animation_state, update_animation_frames).chain(),
            );
    }
}
