//! Motion domain: unit tests for timing buffers, transitions, body actuation,
//! and per-state physics.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::body::{BodyActuator, BodyState};
use super::components::TimingBuffers;
use super::config::MotionConfig;
use super::input::InputSnapshot;
use super::state::{Motion, MotionState, TransitionCtx, enter_state, exit_state, next_motion};
use super::systems::dispatch::apply_state_physics;
use super::systems::report::normalized_speed;

const DT: f32 = 1.0 / 60.0;

fn config() -> MotionConfig {
    MotionConfig::default()
}

fn neutral_input() -> InputSnapshot {
    InputSnapshot::default()
}

fn grounded_ctx() -> TransitionCtx {
    TransitionCtx {
        grounded: true,
        headroom: true,
        in_climb_zone: false,
        vertical_velocity: 0.0,
        can_jump: false,
        action_done: false,
    }
}

/// Body components plus a macro-free way to borrow them as an actuator.
struct TestBody {
    state: BodyState,
    velocity: LinearVelocity,
    gravity: GravityScale,
    collider: Collider,
}

impl TestBody {
    fn new(config: &MotionConfig) -> Self {
        Self {
            state: BodyState::new(config),
            velocity: LinearVelocity::default(),
            gravity: GravityScale(config.default_gravity_scale),
            collider: Collider::rectangle(
                config.normal_collider.width,
                config.normal_collider.height,
            ),
        }
    }

    fn actuator(&mut self) -> BodyActuator<'_> {
        BodyActuator::new(
            &mut self.state,
            &mut self.velocity,
            &mut self.gravity,
            &mut self.collider,
            None,
        )
    }
}

// -----------------------------------------------------------------------------
// TimingBuffers tests
// -----------------------------------------------------------------------------

#[test]
fn test_coyote_resets_while_grounded() {
    let config = config();
    let mut timing = TimingBuffers::default();

    for _ in 0..10 {
        timing.update(true, false, DT, &config);
    }
    assert_eq!(timing.coyote, config.coyote_time);
}

#[test]
fn test_counters_never_go_negative() {
    let config = config();
    let mut timing = TimingBuffers::default();

    for _ in 0..120 {
        timing.update(false, false, DT, &config);
        assert!(timing.coyote >= 0.0);
        assert!(timing.jump_buffer >= 0.0);
    }
}

#[test]
fn test_jump_requires_both_counters() {
    let config = config();
    let mut timing = TimingBuffers::default();

    // Buffered press while long airborne: coyote expired, no jump
    for _ in 0..60 {
        timing.update(false, false, DT, &config);
    }
    timing.update(false, true, DT, &config);
    assert!(timing.jump_buffer > 0.0);
    assert!(!timing.can_jump());

    // Landing refreshes coyote; the buffered press is honored
    timing.update(true, false, DT, &config);
    assert!(timing.can_jump());
}

#[test]
fn test_jump_consumption() {
    let config = config();
    let mut timing = TimingBuffers::default();

    timing.update(true, true, DT, &config);
    assert!(timing.can_jump());

    timing.consume_jump();
    assert_eq!(timing.coyote, 0.0);
    assert_eq!(timing.jump_buffer, 0.0);
    assert!(!timing.can_jump());

    // Still not jumpable until a new ground contact or press
    timing.update(false, false, DT, &config);
    assert!(!timing.can_jump());
}

#[test]
fn test_coyote_jump_after_leaving_ground() {
    let config = config();
    let mut timing = TimingBuffers::default();

    // Grounded, then walk off the ledge; press jump 0.03s later
    timing.update(true, false, DT, &config);
    timing.update(false, false, 0.03, &config);
    timing.update(false, true, DT, &config);

    assert!(timing.can_jump());

    // Firing the jump zeroes both counters on the same tick
    timing.consume_jump();
    assert_eq!(timing.coyote, 0.0);
    assert_eq!(timing.jump_buffer, 0.0);
}

// -----------------------------------------------------------------------------
// Transition table tests
// -----------------------------------------------------------------------------

#[test]
fn test_locomotion_to_jump_on_can_jump() {
    let mut ctx = grounded_ctx();
    ctx.can_jump = true;
    assert_eq!(
        next_motion(Motion::Locomotion, &neutral_input(), &ctx),
        Some(Motion::Jump)
    );
}

#[test]
fn test_locomotion_to_crouch_on_press() {
    let mut input = neutral_input();
    input.crouch_pressed = true;
    input.crouch_held = true;
    assert_eq!(
        next_motion(Motion::Locomotion, &input, &grounded_ctx()),
        Some(Motion::Crouch)
    );
}

#[test]
fn test_locomotion_to_fall_when_airborne() {
    let mut ctx = grounded_ctx();
    ctx.grounded = false;
    ctx.vertical_velocity = -10.0;
    assert_eq!(
        next_motion(Motion::Locomotion, &neutral_input(), &ctx),
        Some(Motion::Fall)
    );
}

#[test]
fn test_jump_to_fall_at_apex() {
    let mut ctx = grounded_ctx();
    ctx.grounded = false;
    ctx.vertical_velocity = 0.0;
    assert_eq!(
        next_motion(Motion::Jump, &neutral_input(), &ctx),
        Some(Motion::Fall)
    );

    ctx.vertical_velocity = 50.0;
    assert_eq!(next_motion(Motion::Jump, &neutral_input(), &ctx), None);
}

#[test]
fn test_fall_coyote_jump() {
    let mut ctx = grounded_ctx();
    ctx.grounded = false;
    ctx.can_jump = true;
    ctx.vertical_velocity = -30.0;
    assert_eq!(
        next_motion(Motion::Fall, &neutral_input(), &ctx),
        Some(Motion::Jump)
    );
}

#[test]
fn test_fall_landing_splits_on_crouch_held() {
    let ctx = grounded_ctx();

    assert_eq!(
        next_motion(Motion::Fall, &neutral_input(), &ctx),
        Some(Motion::Locomotion)
    );

    let mut input = neutral_input();
    input.crouch_held = true;
    assert_eq!(next_motion(Motion::Fall, &input, &ctx), Some(Motion::Crouch));
}

#[test]
fn test_crouch_stand_requires_headroom() {
    let mut input = neutral_input();
    input.crouch_released = true;
    input.crouch_held = false;

    let mut ctx = grounded_ctx();
    ctx.headroom = false;
    assert_eq!(next_motion(Motion::Crouch, &input, &ctx), None);

    ctx.headroom = true;
    assert_eq!(
        next_motion(Motion::Crouch, &input, &ctx),
        Some(Motion::Locomotion)
    );
}

#[test]
fn test_crouch_walk_cycle_follows_deadzone() {
    let mut input = neutral_input();
    input.crouch_held = true;

    input.horizontal = 0.5;
    assert_eq!(
        next_motion(Motion::Crouch, &input, &grounded_ctx()),
        Some(Motion::CrouchWalk)
    );

    input.horizontal = 0.05;
    assert_eq!(
        next_motion(Motion::CrouchWalk, &input, &grounded_ctx()),
        Some(Motion::Crouch)
    );
}

#[test]
fn test_attack_preempts_ground_and_air_states() {
    let mut input = neutral_input();
    input.attack_pressed = true;

    let mut air_ctx = grounded_ctx();
    air_ctx.grounded = false;
    air_ctx.vertical_velocity = -3.0;

    for (state, ctx) in [
        (Motion::Locomotion, grounded_ctx()),
        (Motion::Jump, air_ctx),
        (Motion::Fall, air_ctx),
        (Motion::Crouch, grounded_ctx()),
        (Motion::CrouchWalk, grounded_ctx()),
    ] {
        assert_eq!(next_motion(state, &input, &ctx), Some(Motion::Attack));
    }

    // Climbing hands are occupied
    let mut climb_ctx = grounded_ctx();
    climb_ctx.grounded = false;
    climb_ctx.in_climb_zone = true;
    assert_eq!(next_motion(Motion::ClimbIdle, &input, &climb_ctx), None);
}

#[test]
fn test_roll_only_from_ground_states() {
    let mut input = neutral_input();
    input.roll_pressed = true;

    assert_eq!(
        next_motion(Motion::Locomotion, &input, &grounded_ctx()),
        Some(Motion::Roll)
    );

    let mut air_ctx = grounded_ctx();
    air_ctx.grounded = false;
    air_ctx.vertical_velocity = -3.0;
    assert_eq!(next_motion(Motion::Fall, &input, &air_ctx), None);
}

#[test]
fn test_attack_completion_returns_by_ground_contact() {
    let mut ctx = grounded_ctx();
    ctx.action_done = true;
    assert_eq!(
        next_motion(Motion::Attack, &neutral_input(), &ctx),
        Some(Motion::Locomotion)
    );

    ctx.grounded = false;
    assert_eq!(
        next_motion(Motion::Attack, &neutral_input(), &ctx),
        Some(Motion::Fall)
    );

    ctx.action_done = false;
    assert_eq!(next_motion(Motion::Attack, &neutral_input(), &ctx), None);
}

#[test]
fn test_climb_grab_and_release() {
    let mut input = neutral_input();
    input.climb_axis = 1.0;

    let mut ctx = grounded_ctx();
    ctx.grounded = false;
    ctx.vertical_velocity = -5.0;
    ctx.in_climb_zone = true;

    assert_eq!(next_motion(Motion::Fall, &input, &ctx), Some(Motion::ClimbIdle));
    assert_eq!(
        next_motion(Motion::ClimbIdle, &input, &ctx),
        Some(Motion::ClimbMove)
    );

    // Letting the axis go settles back to climb-idle
    input.climb_axis = 0.0;
    assert_eq!(
        next_motion(Motion::ClimbMove, &input, &ctx),
        Some(Motion::ClimbIdle)
    );

    // Jumping off or drifting out of the region drops to fall
    input.jump_pressed = true;
    assert_eq!(next_motion(Motion::ClimbIdle, &input, &ctx), Some(Motion::Fall));

    input.jump_pressed = false;
    ctx.in_climb_zone = false;
    assert_eq!(next_motion(Motion::ClimbMove, &input, &ctx), Some(Motion::Fall));
}

// -----------------------------------------------------------------------------
// Blend window tests
// -----------------------------------------------------------------------------

#[test]
fn test_blend_prefers_target() {
    let mut state = MotionState::default();
    assert_eq!(state.active(), Motion::Locomotion);

    state.begin_transition(Motion::Jump, 0.08);
    assert_eq!(state.current(), Motion::Locomotion);
    assert_eq!(state.target(), Some(Motion::Jump));
    assert_eq!(state.active(), Motion::Jump);
}

#[test]
fn test_blend_settles_after_window() {
    let mut state = MotionState::default();
    state.begin_transition(Motion::Fall, 0.08);

    state.tick_blend(0.05);
    assert_eq!(state.target(), Some(Motion::Fall));

    state.tick_blend(0.05);
    assert_eq!(state.current(), Motion::Fall);
    assert_eq!(state.target(), None);
}

#[test]
fn test_back_to_back_transitions_keep_latest_target() {
    let mut state = MotionState::default();
    state.begin_transition(Motion::Jump, 0.08);
    state.begin_transition(Motion::Fall, 0.08);

    assert_eq!(state.current(), Motion::Jump);
    assert_eq!(state.active(), Motion::Fall);
}

// -----------------------------------------------------------------------------
// Body actuator tests
// -----------------------------------------------------------------------------

#[test]
fn test_velocity_setters_preserve_orthogonal_component() {
    let config = config();
    let mut body = TestBody::new(&config);

    {
        let mut actuator = body.actuator();
        actuator.set_vertical_velocity(-42.0);
        actuator.set_horizontal_velocity(100.0);
    }
    assert_eq!(body.velocity.0, Vec2::new(100.0, -42.0));

    {
        let mut actuator = body.actuator();
        actuator.apply_jump_impulse(config.jump_force);
    }
    assert_eq!(body.velocity.x, 100.0);
    assert_eq!(body.velocity.y, config.jump_force);

    {
        let mut actuator = body.actuator();
        actuator.add_velocity(-10.0, 5.0);
    }
    assert_eq!(body.velocity.0, Vec2::new(90.0, config.jump_force + 5.0));
}

#[test]
fn test_facing_consistency_after_flip() {
    let config = config();
    let mut body = TestBody::new(&config);
    assert!(body.state.facing_right);

    let mut actuator = body.actuator();
    actuator.flip();
    // The authoritative flag is updated before flip returns; a re-read agrees
    assert!(!actuator.facing_right());
    assert_eq!(actuator.facing_direction(), -1.0);

    actuator.flip();
    assert!(actuator.facing_right());
}

#[test]
fn test_collider_restore_idempotence() {
    let config = config();
    let mut body = TestBody::new(&config);

    for _ in 0..10 {
        let mut actuator = body.actuator();
        actuator.resize_collider(config.crouch_collider.size(), config.crouch_collider.offset());
        actuator.restore_collider();
    }

    assert_eq!(body.state.collider_size, config.normal_collider.size());
    assert_eq!(body.state.collider_offset, config.normal_collider.offset());
}

// -----------------------------------------------------------------------------
// Enter/exit effect tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_enter_applies_impulse_and_consumes_buffers() {
    let config = config();
    let mut body = TestBody::new(&config);
    let mut state = MotionState::default();
    let mut timing = TimingBuffers::default();
    timing.update(true, true, DT, &config);
    assert!(timing.can_jump());

    let mut actuator = body.actuator();
    enter_state(Motion::Jump, &mut state, &mut timing, &mut actuator, &config);

    assert_eq!(actuator.velocity().y, config.jump_force);
    assert!(!timing.can_jump());
}

#[test]
fn test_crouch_enter_resizes_and_stops() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.velocity.x = 200.0;

    let mut state = MotionState::default();
    let mut timing = TimingBuffers::default();
    let mut actuator = body.actuator();
    enter_state(Motion::Crouch, &mut state, &mut timing, &mut actuator, &config);

    assert_eq!(actuator.velocity().x, 0.0);
    drop(actuator);
    assert_eq!(body.state.collider_size, config.crouch_collider.size());
    assert_eq!(body.state.collider_offset, config.crouch_collider.offset());
}

#[test]
fn test_gravity_restore_does_not_compound() {
    let config = config();
    let mut body = TestBody::new(&config);
    let mut state = MotionState::default();
    let mut timing = TimingBuffers::default();

    for _ in 0..5 {
        let mut actuator = body.actuator();
        enter_state(
            Motion::ClimbIdle,
            &mut state,
            &mut timing,
            &mut actuator,
            &config,
        );
        assert_eq!(body.gravity.0, 0.0);

        let mut actuator = body.actuator();
        enter_state(
            Motion::ClimbMove,
            &mut state,
            &mut timing,
            &mut actuator,
            &config,
        );
        let mut actuator = body.actuator();
        exit_state(Motion::ClimbMove, &mut actuator);
        assert_eq!(body.gravity.0, config.default_gravity_scale);
    }

    assert_eq!(body.gravity.0, config.default_gravity_scale);
}

#[test]
fn test_roll_enter_locks_facing_direction() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.state.facing_right = false;

    let mut state = MotionState::default();
    let mut timing = TimingBuffers::default();
    let mut actuator = body.actuator();
    enter_state(Motion::Roll, &mut state, &mut timing, &mut actuator, &config);

    assert_eq!(state.roll_direction, -1.0);
    assert_eq!(state.action_timer, config.roll_duration);
}

// -----------------------------------------------------------------------------
// Physics dispatch tests
// -----------------------------------------------------------------------------

#[test]
fn test_locomotion_sets_run_velocity_and_flips() {
    let config = config();
    let mut body = TestBody::new(&config);
    let state = MotionState::default();

    let mut input = neutral_input();
    input.horizontal = -1.0;

    let mut actuator = body.actuator();
    apply_state_physics(Motion::Locomotion, &state, true, &input, &config, &mut actuator);

    assert_eq!(actuator.velocity().x, -config.run_speed);
    assert!(!actuator.facing_right());
}

#[test]
fn test_air_control_factor() {
    let config = config();
    let mut body = TestBody::new(&config);
    let state = MotionState::default();

    let mut input = neutral_input();
    input.horizontal = 1.0;

    let mut actuator = body.actuator();
    apply_state_physics(Motion::Fall, &state, false, &input, &config, &mut actuator);

    assert_eq!(actuator.velocity().x, config.run_speed * 0.8);
}

#[test]
fn test_crouch_lock_without_input() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.velocity.x = 150.0;
    let state = MotionState::default();

    // Below the deadzone, horizontal velocity is exactly zero every tick
    let mut input = neutral_input();
    input.horizontal = 0.05;

    for _ in 0..10 {
        let mut actuator = body.actuator();
        apply_state_physics(Motion::Crouch, &state, true, &input, &config, &mut actuator);
        assert_eq!(body.velocity.x, 0.0);
    }

    // The tick input exceeds the deadzone, crouch speed applies and the
    // transition table moves to crouch-walk
    input.horizontal = 0.6;
    let mut actuator = body.actuator();
    apply_state_physics(Motion::Crouch, &state, true, &input, &config, &mut actuator);
    assert_eq!(body.velocity.x, 0.6 * config.crouch_speed);

    let mut table_input = input.clone();
    table_input.crouch_held = true;
    assert_eq!(
        next_motion(Motion::Crouch, &table_input, &grounded_ctx()),
        Some(Motion::CrouchWalk)
    );
}

#[test]
fn test_roll_direction_lock_ignores_reversed_input() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.state.facing_right = false;

    let mut state = MotionState::default();
    let mut timing = TimingBuffers::default();
    {
        let mut actuator = body.actuator();
        enter_state(Motion::Roll, &mut state, &mut timing, &mut actuator, &config);
    }

    // Input reversed mid-roll: velocity stays locked leftward
    let mut input = neutral_input();
    input.horizontal = 1.0;

    for _ in 0..20 {
        let mut actuator = body.actuator();
        apply_state_physics(Motion::Roll, &state, true, &input, &config, &mut actuator);
        assert_eq!(body.velocity.x, -config.roll_speed);
    }
    assert!(!body.state.facing_right);
}

#[test]
fn test_attack_air_control_and_grounded_anchor() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.velocity.y = -3.0;
    let state = MotionState::default();

    let mut input = neutral_input();
    input.horizontal = 1.0;

    // Airborne attack allows half-speed control
    {
        let mut actuator = body.actuator();
        apply_state_physics(Motion::Attack, &state, false, &input, &config, &mut actuator);
    }
    assert_eq!(body.velocity.x, config.run_speed * 0.5);
    assert_eq!(body.velocity.y, -3.0);

    // Grounded attack is anchored regardless of input
    {
        let mut actuator = body.actuator();
        apply_state_physics(Motion::Attack, &state, true, &input, &config, &mut actuator);
    }
    assert_eq!(body.velocity.x, 0.0);
}

#[test]
fn test_climb_handlers_control_vertical_velocity() {
    let config = config();
    let mut body = TestBody::new(&config);
    body.velocity.y = -80.0;
    let state = MotionState::default();

    {
        let mut actuator = body.actuator();
        apply_state_physics(
            Motion::ClimbIdle,
            &state,
            false,
            &neutral_input(),
            &config,
            &mut actuator,
        );
    }
    assert_eq!(body.velocity.y, 0.0);

    let mut input = neutral_input();
    input.climb_axis = -1.0;
    {
        let mut actuator = body.actuator();
        apply_state_physics(Motion::ClimbMove, &state, false, &input, &config, &mut actuator);
    }
    assert_eq!(body.velocity.y, -config.climb_speed);
}

// -----------------------------------------------------------------------------
// Report tests
// -----------------------------------------------------------------------------

#[test]
fn test_normalized_speed_guard_and_clamp() {
    assert_eq!(normalized_speed(100.0, 0.0), 0.0);
    assert_eq!(normalized_speed(100.0, -1.0), 0.0);
    assert_eq!(normalized_speed(-160.0, 320.0), 0.5);
    assert_eq!(normalized_speed(640.0, 320.0), 1.0);
}
