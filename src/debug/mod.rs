//! Debug overlay for motion-state inspection (dev-tools only).
//!
//! F1 toggles a small overlay showing the active state, blend target,
//! velocity, contact flags, and the coyote/jump-buffer counters.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{BodyState, ContactState, MotionReport, MotionState, Player, TimingBuffers};

/// Resource tracking debug overlay state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub show_info: bool,
}

/// Marker for the motion info overlay
#[derive(Component, Debug)]
pub struct MotionInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, update_motion_overlay).chain());
    }
}

fn toggle_overlay(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
        info!(
            "[DEBUG] Motion overlay {}",
            if debug_state.show_info { "ON" } else { "OFF" }
        );
    }
}

fn update_motion_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<
        (
            &MotionState,
            &TimingBuffers,
            &ContactState,
            &LinearVelocity,
            &BodyState,
            &MotionReport,
        ),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<MotionInfoOverlay>>,
    existing_overlay: Query<Entity, With<MotionInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_motion_overlay(&mut commands);
        return;
    }

    if let (Some((state, timing, contact, velocity, body, report)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let mut triggers = String::new();
        for (label, fired) in [
            ("jump", report.jump_requested),
            ("attack", report.attack_requested),
            ("roll", report.roll_requested),
            ("crouch", report.crouch_requested),
            ("uncrouch", report.crouch_released),
        ] {
            if fired {
                triggers.push_str(label);
                triggers.push(' ');
            }
        }

        **text = format!(
            "State: {:?}\nTarget: {:?}\nVel: ({:.0}, {:.0}) Speed: {:.2}\nGrounded: {} Headroom: {} Climb: {}\nCoyote: {:.3} Buffer: {:.3}\nFacing: {}\nTriggers: {}",
            state.current(),
            state.target(),
            velocity.x,
            velocity.y,
            report.normalized_speed,
            contact.grounded,
            contact.headroom,
            contact.in_climb_zone,
            timing.coyote,
            timing.jump_buffer,
            if body.facing_right { "right" } else { "left" },
            triggers,
        );
    }
}

fn spawn_motion_overlay(commands: &mut Commands) {
    commands.spawn((
        MotionInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
