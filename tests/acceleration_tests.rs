//! Acceleration Model Tests
//!
//! Tests for the velocity counter and step multiplier.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test acceleration_tests

use encoder_firmware::config::{AccelerationProfile, ACCEL_CEILING, ACCEL_DECAY};
use encoder_firmware::input::acceleration::AccelerationModel;

fn saturate(model: &AccelerationModel) {
    for _ in 0..1_000 {
        model.tick(true);
    }
}

#[test]
fn acceleration_creation() {
    let model = AccelerationModel::default();
    assert_eq!(model.counter(), 0);
    assert_eq!(model.multiplier(), 0);
    assert!(model.is_enabled());
    assert_eq!(model.profile(), AccelerationProfile::DEFAULT);
}

#[test]
fn counter_strictly_increases_while_moving() {
    let model = AccelerationModel::default();
    let mut previous = model.counter();

    loop {
        model.tick(true);
        let counter = model.counter();
        if counter == ACCEL_CEILING {
            break;
        }
        assert!(counter > previous, "{counter} after {previous}");
        previous = counter;
    }
}

#[test]
fn counter_saturates_at_ceiling() {
    let model = AccelerationModel::default();
    saturate(&model);
    assert_eq!(model.counter(), ACCEL_CEILING);

    model.tick(true);
    assert_eq!(model.counter(), ACCEL_CEILING);
    assert_eq!(model.multiplier(), 12);
}

#[test]
fn counter_decays_to_exactly_zero() {
    let model = AccelerationModel::default();
    saturate(&model);

    let idle_ticks = AccelerationProfile::DEFAULT
        .idle_ticks_to_zero()
        .expect("default curve decays");
    assert_eq!(idle_ticks, u32::from(ACCEL_CEILING / ACCEL_DECAY));

    for _ in 0..idle_ticks - 1 {
        model.tick(false);
    }
    assert_eq!(model.counter(), ACCEL_DECAY);

    model.tick(false);
    assert_eq!(model.counter(), 0);

    // Stays clamped instead of wrapping to a huge multiplier
    model.tick(false);
    assert_eq!(model.counter(), 0);
    assert_eq!(model.multiplier(), 0);
}

#[test]
fn decay_clamps_odd_remainder() {
    let profile = AccelerationProfile {
        ceiling: 1_000,
        increment: 3,
        decay: 2,
    };
    let model = AccelerationModel::new(profile, true);
    model.tick(true); // 0 -> 3
    model.tick(false); // 3 -> 1
    model.tick(false); // 1 -> 0, not 65535
    assert_eq!(model.counter(), 0);
}

#[test]
fn multiplier_is_counter_shifted() {
    let model = AccelerationModel::default();
    for _ in 0..20 {
        model.tick(true);
    }
    assert_eq!(model.multiplier(), model.counter() >> 8);
    assert!(model.multiplier() >= 1);
}

#[test]
fn scale_uses_only_the_sign() {
    let model = AccelerationModel::default();
    assert_eq!(model.scale(0), 0);
    assert_eq!(model.scale(1), 1);
    assert_eq!(model.scale(3), 1);
    assert_eq!(model.scale(-2), -1);

    saturate(&model);
    assert_eq!(model.scale(1), 13);
    assert_eq!(model.scale(-5), -13);
}

#[test]
fn disabling_resets_counter() {
    let model = AccelerationModel::default();
    saturate(&model);

    model.set_enabled(false);
    assert_eq!(model.counter(), 0);
    assert_eq!(model.scale(4), 1);

    // Disabled model ignores movement
    model.tick(true);
    assert_eq!(model.counter(), 0);

    model.set_enabled(true);
    model.tick(true);
    assert_eq!(model.counter(), 25);
}

#[test]
fn acceleration_reset_explicit() {
    let model = AccelerationModel::default();
    saturate(&model);
    model.reset();
    assert_eq!(model.counter(), 0);
    assert!(model.is_enabled());
}

#[test]
fn non_decaying_profile() {
    let profile = AccelerationProfile {
        decay: 0,
        ..AccelerationProfile::DEFAULT
    };
    assert_eq!(profile.idle_ticks_to_zero(), None);

    let model = AccelerationModel::new(profile, true);
    model.tick(true);
    for _ in 0..100 {
        model.tick(false);
    }
    assert_eq!(model.counter(), 25);
}
