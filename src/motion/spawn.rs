//! Motion domain: player bootstrap and dev test-room geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::anim::AnimationController;
use crate::motion::body::{BodyState, build_collider};
use crate::motion::components::{ContactState, GameLayer, MotionReport, Player, TimingBuffers};
use crate::motion::config::MotionConfig;
use crate::motion::state::MotionState;

#[cfg(feature = "dev-tools")]
use crate::motion::components::{Climbable, Ground, Wall};

pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<MotionConfig>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let size = config.normal_collider.size();
    let offset = config.normal_collider.offset();

    info!(
        "Spawning player: collider={}x{}, gravity_scale={}",
        size.x, size.y, config.default_gravity_scale
    );

    commands.spawn((
        // Identity & motion
        (
            Player,
            MotionState::default(),
            TimingBuffers::default(),
            ContactState::default(),
            BodyState::new(&config),
            MotionReport::default(),
            AnimationController::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            build_collider(size, offset),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(config.default_gravity_scale),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}

#[cfg(feature = "dev-tools")]
pub(crate) fn spawn_test_room(mut commands: Commands, existing_room: Query<Entity, With<Ground>>) {
    // Re-entering the run state (e.g. after unpausing) must not duplicate
    // the geometry
    if !existing_room.is_empty() {
        return;
    }

    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let ladder_color = Color::srgba(0.7, 0.6, 0.2, 0.6);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let climb_layers = CollisionLayers::new(GameLayer::Climb, [GameLayer::Player]);

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(800.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -200.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(800.0, 40.0),
        ground_layers,
    ));

    // Left wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(-420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Right wall
    commands.spawn((
        Wall,
        Sprite {
            color: wall_color,
            custom_size: Some(Vec2::new(40.0, 500.0)),
            ..default()
        },
        Transform::from_xyz(420.0, 50.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(40.0, 500.0),
        wall_layers,
    ));

    // Low tunnel for crouch testing: platform close above the ground
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(180.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(-250.0, -140.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(180.0, 20.0),
        ground_layers,
    ));

    // Platform - right side
    commands.spawn((
        Ground,
        Sprite {
            color: platform_color,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(250.0, -60.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        ground_layers,
    ));

    // Ladder up to the right platform
    commands.spawn((
        Climbable,
        Sprite {
            color: ladder_color,
            custom_size: Some(Vec2::new(20.0, 160.0)),
            ..default()
        },
        Transform::from_xyz(180.0, -120.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(20.0, 160.0),
        Sensor,
        climb_layers,
    ));
}
