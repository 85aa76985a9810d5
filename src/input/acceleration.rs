//! Acceleration Model
//!
//! A velocity estimate kept as a bounded counter: every service tick
//! subtracts a small decay, every tick with movement adds a larger
//! increment. The counter shifted down by [`ACCEL_SHIFT`] is an additive
//! multiplier, so a fast turn reports `1 + multiplier` steps per notch.
//!
//! The counter is written by the service tick only. The polling loop reads
//! it and may reset it when acceleration is switched off; a stale value
//! from one tick ago is harmless, so plain atomics are enough.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::config::{AccelerationProfile, ACCEL_SHIFT};

/// Movement-driven step multiplier
pub struct AccelerationModel {
    counter: AtomicU16,
    enabled: AtomicBool,
    profile: AccelerationProfile,
}

impl AccelerationModel {
    /// Create a model with an idle counter
    #[must_use]
    pub const fn new(profile: AccelerationProfile, enabled: bool) -> Self {
        Self {
            counter: AtomicU16::new(0),
            enabled: AtomicBool::new(enabled),
            profile,
        }
    }

    /// Advance one service tick
    ///
    /// Decay is applied first and clamps at zero, then movement adds the
    /// increment capped at the ceiling.
    pub fn tick(&self, moved: bool) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        let mut counter = self.counter.load(Ordering::Relaxed);
        counter = counter.saturating_sub(self.profile.decay);
        if moved {
            counter = counter
                .saturating_add(self.profile.increment)
                .min(self.profile.ceiling);
        }
        self.counter.store(counter, Ordering::Relaxed);
    }

    /// Current additive multiplier (0 when disabled)
    #[must_use]
    pub fn multiplier(&self) -> u16 {
        if self.is_enabled() {
            self.counter.load(Ordering::Relaxed) >> ACCEL_SHIFT
        } else {
            0
        }
    }

    /// Scale a signed notch count to the reported movement
    ///
    /// Only the sign of `notches` matters: the result is
    /// `sign * (1 + multiplier)`, or 0 when there is no movement.
    #[must_use]
    pub fn scale(&self, notches: i16) -> i16 {
        let magnitude = i16::try_from(self.multiplier())
            .unwrap_or(i16::MAX)
            .saturating_add(1);
        notches.signum().saturating_mul(magnitude)
    }

    /// Raw counter value
    #[must_use]
    pub fn counter(&self) -> u16 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Enable or disable acceleration; disabling zeroes the counter
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.counter.store(0, Ordering::Relaxed);
        }
    }

    /// Whether acceleration is enabled
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Drop accumulated velocity
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
    }

    /// Curve in use
    #[must_use]
    pub const fn profile(&self) -> AccelerationProfile {
        self.profile
    }
}

impl Default for AccelerationModel {
    fn default() -> Self {
        Self::new(AccelerationProfile::DEFAULT, true)
    }
}
