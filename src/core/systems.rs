//! Core domain: camera setup and run flow systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Enter the run once startup (config load, camera) has finished.
pub(crate) fn begin_run(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

/// Escape toggles pause. Physics time is paused alongside the fixed-tick
/// pipeline so the body does not keep integrating while the game is frozen.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    current: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    match current.get() {
        GameState::Run => {
            physics_time.pause();
            next.set(GameState::Paused);
            info!("Paused");
        }
        GameState::Paused => {
            physics_time.unpause();
            next.set(GameState::Run);
            info!("Resumed");
        }
        GameState::Boot => {}
    }
}
