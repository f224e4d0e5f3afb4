//! Motion domain: tuning resource and RON loading.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Collider dimensions as stored in the tuning file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ColliderDef {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ColliderDef {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }
}

/// Immutable movement tuning, loaded once at startup and never mutated.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct MotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    pub climb_speed: f32,
    pub jump_force: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub roll_speed: f32,
    pub roll_duration: f32,
    pub attack_duration: f32,
    pub normal_collider: ColliderDef,
    pub crouch_collider: ColliderDef,
    pub ground_check_distance: f32,
    pub default_gravity_scale: f32,
    /// World gravity magnitude, applied downward by the physics engine
    pub base_gravity: f32,
    /// Cross-fade window during which the outgoing and target states overlap
    pub state_blend_time: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 140.0,
            run_speed: 320.0,
            crouch_speed: 90.0,
            climb_speed: 160.0,
            jump_force: 680.0,
            coyote_time: 0.2,
            jump_buffer_time: 0.1,
            roll_speed: 520.0,
            roll_duration: 0.4,
            attack_duration: 0.3,
            normal_collider: ColliderDef {
                width: 24.0,
                height: 48.0,
                offset_x: 0.0,
                offset_y: 0.0,
            },
            crouch_collider: ColliderDef {
                width: 24.0,
                height: 28.0,
                offset_x: 0.0,
                offset_y: -10.0,
            },
            ground_check_distance: 4.0,
            default_gravity_scale: 1.0,
            base_gravity: 1800.0,
            state_blend_time: 0.08,
        }
    }
}

/// Error type for tuning-file load failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn load_config_file(path: &Path) -> Result<MotionConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron::Options::default()
        .from_str(&contents)
        .map_err(|e| ConfigLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Load motion tuning from assets/data/motion.ron, falling back to defaults.
/// A missing or malformed tuning file must never abort the game.
pub(crate) fn load_motion_config(mut commands: Commands) {
    let path = Path::new("assets/data/motion.ron");

    let config = match load_config_file(path) {
        Ok(config) => {
            info!(
                "Loaded motion tuning: run_speed={}, jump_force={}, coyote={}s, buffer={}s",
                config.run_speed, config.jump_force, config.coyote_time, config.jump_buffer_time
            );
            config
        }
        Err(e) => {
            warn!("{}, using default motion tuning", e);
            MotionConfig::default()
        }
    };

    commands.insert_resource(Gravity(Vec2::NEG_Y * config.base_gravity));
    commands.insert_resource(config);
}
