#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn simulate<V: Motion>(body: &mut RigidBody<V>, delta_time: f64, steps: usize) {
    for _ in 0..steps {
        body.update(delta_time);
    }
}

// --- Defaults ---

#[test]
fn default_max_velocity_is_disabled() {
    let body = RigidBody1D::new();
    assert!(body.max_velocity < 0.0);
}

#[test]
fn default_stop_velocity_is_disabled() {
    let body = RigidBody1D::new();
    assert!(body.stop_velocity < 0.0);
}

#[test]
fn default_drag_is_zero() {
    let body = RigidBody2D::new();
    assert_eq!(body.drag_coefficient(), 0.0);
}

#[test]
fn default_mass_is_positive() {
    let body = RigidBody2D::new();
    assert!(body.mass() > 0.0);
}

// --- Validation ---

#[test]
fn mass_round_trips() {
    let mut body = RigidBody1D::new();
    body.set_mass(2.5).unwrap();
    assert_eq!(body.mass(), 2.5);
}

#[test]
fn mass_must_be_positive() {
    let mut body = RigidBody1D::new();
    body.set_mass(3.0).unwrap();
    assert_eq!(body.set_mass(0.0), Err(ValidationError::Mass { value: 0.0 }));
    assert_eq!(body.set_mass(-1.0), Err(ValidationError::Mass { value: -1.0 }));
    assert_eq!(body.mass(), 3.0);
}

#[test]
fn mass_rejects_nan() {
    let mut body = RigidBody2D::new();
    assert!(body.set_mass(f64::NAN).is_err());
    assert_eq!(body.mass(), 1.0);
}

#[test]
fn mass_error_message() {
    let mut body = RigidBody1D::new();
    let err = body.set_mass(0.0).unwrap_err();
    assert_eq!(err.to_string(), "mass must be > 0");
}

#[test]
fn drag_round_trips_including_zero() {
    let mut body = RigidBody2D::new();
    body.set_drag_coefficient(4.0).unwrap();
    assert_eq!(body.drag_coefficient(), 4.0);
    body.set_drag_coefficient(0.0).unwrap();
    assert_eq!(body.drag_coefficient(), 0.0);
}

#[test]
fn drag_must_be_non_negative() {
    let mut body = RigidBody1D::new();
    body.set_drag_coefficient(2.0).unwrap();
    let err = body.set_drag_coefficient(-1.0).unwrap_err();
    assert_eq!(err.to_string(), "drag coefficient must be >= 0");
    assert_eq!(body.drag_coefficient(), 2.0);
}

// --- Force table ---

#[test]
fn removing_unknown_force_returns_false() {
    let mut body = RigidBody1D::new();
    assert!(!body.remove_force(ForceId(0)));
}

#[test]
fn removing_applied_force_returns_true() {
    let mut body = RigidBody1D::new();
    let id = body.apply_force(10.0);
    assert!(body.remove_force(id));
    assert!(!body.remove_force(id));
    assert_eq!(body.pending_forces(), 0);
}

#[test]
fn force_ids_increase_and_are_not_reused() {
    let mut body = RigidBody2D::new();
    let a = body.apply_force(Vector2::new(1.0, 0.0));
    let b = body.apply_force(Vector2::new(0.0, 1.0));
    body.remove_forces();
    let c = body.apply_force(Vector2::new(1.0, 1.0));
    assert!(a < b);
    assert!(b < c);
    assert_eq!(c.get(), 2);
}

#[test]
fn removing_middle_force_keeps_others_addressable() {
    let mut body = RigidBody1D::new();
    let a = body.apply_force(1.0);
    let b = body.apply_force(2.0);
    let c = body.apply_force(4.0);
    assert!(body.remove_force(a));
    assert!(approx_eq(body.net_force(), 6.0));
    assert!(body.remove_force(c));
    assert!(approx_eq(body.net_force(), 2.0));
    assert!(body.remove_force(b));
    assert_eq!(body.pending_forces(), 0);
}

#[test]
fn removed_force_no_longer_contributes() {
    let mut body = RigidBody1D::new();
    let push = body.apply_force(10.0);
    body.apply_force(-4.0);
    body.remove_force(push);
    body.update(1.0);
    assert!(approx_eq(body.acceleration, -4.0));
}

#[test]
fn forces_persist_across_updates() {
    let mut body = RigidBody1D::new();
    body.apply_force(2.0);
    simulate(&mut body, 1.0, 3);
    assert!(approx_eq(body.velocity, 6.0));
    assert_eq!(body.pending_forces(), 1);
}

#[test]
fn applied_force_waits_for_update() {
    let mut body = RigidBody2D::new();
    body.apply_force(Vector2::new(5.0, 0.0));
    assert_eq!(body.velocity, Vector2::ZERO);
    assert_eq!(body.position, Vector2::ZERO);
}

// --- Integration ---

#[test]
fn update_without_forces_or_velocity_is_noop() {
    let mut body = RigidBody2D::new();
    body.set_drag_coefficient(3.0).unwrap();
    body.position = Vector2::new(4.0, -2.0);
    for dt in [0.0, 0.016, 1.0, 10.0] {
        body.update(dt);
        assert_eq!(body.position, Vector2::new(4.0, -2.0));
        assert_eq!(body.velocity, Vector2::ZERO);
    }
}

#[test]
fn falling_body_without_drag() {
    let mut body = RigidBody1D::new();
    body.apply_force(-10.0);
    body.update(1.0);
    assert!(approx_eq(body.acceleration, -10.0));
    assert!(approx_eq(body.velocity, -10.0));
    assert!(approx_eq(body.position, -5.0));
}

#[test]
fn falling_body_2d_matches_1d() {
    let mut body = RigidBody2D::new();
    body.apply_force(Vector2::new(0.0, -10.0));
    body.update(1.0);
    assert!(body.acceleration.is_equal(Vector2::new(0.0, -10.0)));
    assert!(body.velocity.is_equal(Vector2::new(0.0, -10.0)));
    assert!(body.position.is_equal(Vector2::new(0.0, -5.0)));
}

#[test]
fn mass_divides_force() {
    let mut body = RigidBody1D::new();
    body.set_mass(4.0).unwrap();
    body.apply_force(8.0);
    body.update(1.0);
    assert!(approx_eq(body.acceleration, 2.0));
}

#[test]
fn multiple_forces_then_coast() {
    let mut body = RigidBody1D::new();
    body.apply_force(-20.0);
    body.apply_force(10.0);

    simulate(&mut body, 0.1, 10);
    assert!(approx_eq(body.acceleration, -10.0));
    assert!(approx_eq(body.velocity, -10.0));
    assert!(approx_eq(body.position, -5.0));

    body.remove_forces();
    simulate(&mut body, 0.1, 10);
    assert!(approx_eq(body.acceleration, 0.0));
    assert!(approx_eq(body.velocity, -10.0));
    assert!(approx_eq(body.position, -15.0));
}

#[test]
fn drag_opposes_velocity() {
    let mut body = RigidBody2D::new();
    body.set_drag_coefficient(2.0).unwrap();
    body.velocity = Vector2::new(3.0, -4.0);
    body.update(0.1);
    assert!(body.acceleration.is_equal(Vector2::new(-6.0, 8.0)));
}

#[test]
fn drag_reaches_terminal_velocity() {
    let mut body = RigidBody1D::new();
    body.set_drag_coefficient(2.0).unwrap();
    body.apply_force(10.0);
    simulate(&mut body, 0.01, 2000);
    assert!((body.velocity - 5.0).abs() < 1e-6);
}

// --- Velocity clamp ---

#[test]
fn max_velocity_caps_speed() {
    let mut body = RigidBody1D::new();
    body.max_velocity = 10.0;
    body.apply_force(-10.0);
    simulate(&mut body, 0.1, 20);
    assert!(approx_eq(body.velocity, -10.0));
    assert!(approx_eq(body.position, -15.0));
}

#[test]
fn max_velocity_caps_speed_with_drag() {
    let mut body = RigidBody1D::new();
    body.max_velocity = 10.0;
    body.set_drag_coefficient(0.5).unwrap();
    body.apply_force(-10.0);
    simulate(&mut body, 0.01, 200);
    assert!(approx_eq(body.velocity, -10.0));
    assert!((body.position - -13.878).abs() < 0.01);
}

#[test]
fn max_velocity_never_exceeded() {
    let mut body = RigidBody2D::new();
    body.max_velocity = 7.0;
    body.apply_force(Vector2::new(30.0, 40.0));
    for _ in 0..100 {
        body.update(0.05);
        assert!(body.velocity.mag() <= 7.0 + EPSILON);
    }
}

#[test]
fn max_velocity_keeps_direction_2d() {
    let mut body = RigidBody2D::new();
    body.max_velocity = 5.0;
    body.apply_force(Vector2::new(300.0, 400.0));
    body.update(1.0);
    assert!(body.velocity.is_equal(Vector2::new(3.0, 4.0)));
}

#[test]
fn zero_max_velocity_pins_body() {
    let mut body = RigidBody1D::new();
    body.max_velocity = 0.0;
    body.apply_force(100.0);
    simulate(&mut body, 0.1, 5);
    assert_eq!(body.velocity, 0.0);
    assert_eq!(body.position, 0.0);
}

// --- Stop velocity ---

#[test]
fn stop_velocity_snaps_to_rest() {
    let mut body = RigidBody1D::new();
    body.stop_velocity = 0.01;
    body.set_drag_coefficient(3.0).unwrap();
    body.velocity = 10.0;
    simulate(&mut body, 0.1, 20);
    assert_eq!(body.velocity, 0.0);
    assert!((body.position - 2.8307).abs() < 0.001);
}

#[test]
fn stop_velocity_stays_at_rest() {
    let mut body = RigidBody2D::new();
    body.stop_velocity = 0.5;
    body.set_drag_coefficient(5.0).unwrap();
    body.velocity = Vector2::new(4.0, 0.0);
    let mut stopped_at = None;
    for step in 0..200 {
        body.update(0.02);
        if stopped_at.is_none() && body.velocity == Vector2::ZERO {
            stopped_at = Some(step);
        }
        if stopped_at.is_some() {
            assert_eq!(body.velocity, Vector2::ZERO);
        }
    }
    assert!(stopped_at.is_some());
}

#[test]
fn disabled_stop_velocity_keeps_creeping() {
    let mut body = RigidBody1D::new();
    body.set_drag_coefficient(3.0).unwrap();
    body.velocity = 10.0;
    simulate(&mut body, 0.1, 20);
    assert!(body.velocity > 0.0);
}

// --- Resting state ---

#[test]
fn new_body_is_resting() {
    assert!(RigidBody2D::new().is_resting());
}

#[test]
fn pushed_body_is_not_resting() {
    let mut body = RigidBody1D::new();
    body.apply_force(1.0);
    assert!(!body.is_resting());
}

#[test]
fn gliding_body_is_not_resting() {
    let mut body = RigidBody1D::new();
    body.velocity = 2.0;
    assert!(!body.is_resting());
}

#[test]
fn velocity_under_stop_threshold_counts_as_resting() {
    let mut body = RigidBody1D::new();
    body.stop_velocity = 0.1;
    body.velocity = 0.05;
    assert!(body.is_resting());
}
