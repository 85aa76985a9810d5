//! System configuration and encoder constants
//!
//! This module defines the compile-time defaults for the encoder driver
//! (tick cadence, gesture timing, acceleration curve, pin names) and the
//! runtime [`EncoderConfig`] applied once at construction.
//!
//! Timing values assume `service()` runs every [`SERVICE_INTERVAL_MS`].

use crate::types::{ActiveLevel, DecoderKind, StepsPerNotch};

/// Recommended service tick period in milliseconds
pub const SERVICE_INTERVAL_MS: u32 = 1;

/// Button is sampled every this many milliseconds; also the debounce time
pub const BUTTON_CHECK_INTERVAL_MS: u32 = 10;

/// Second tap must come within this window to count as a double click
pub const DOUBLE_CLICK_TIME_MS: u32 = 600;

/// Button is reported as held after this long
pub const HOLD_TIME_MS: u32 = 1200;

/// Acceleration counter ceiling (multiplier tops out at `3072 >> 8 = 12`)
pub const ACCEL_CEILING: u16 = 3072;

/// Counter increment on a tick with movement
pub const ACCEL_INCREMENT: u16 = 25;

/// Counter decay on every tick
pub const ACCEL_DECAY: u16 = 2;

/// Fixed-point shift turning the counter into a step multiplier
pub const ACCEL_SHIFT: u32 = 8;

/// Main loop polling period used by the demo binary
pub const POLL_INTERVAL_MS: u32 = 20;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Encoder A input (CLK)
    pub const ENCODER_A: &str = "PA0";

    /// Encoder B input (DT)
    pub const ENCODER_B: &str = "PA1";

    /// Encoder push button (SW)
    pub const ENCODER_SW: &str = "PA2";
}

/// Button gesture timing, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonTiming {
    /// Interval between button checks
    pub check_interval_ms: u32,
    /// Double-click window
    pub double_click_ms: u32,
    /// Hold threshold
    pub hold_ms: u32,
}

impl ButtonTiming {
    /// Default timing for a 1 ms service tick
    pub const DEFAULT: Self = Self {
        check_interval_ms: BUTTON_CHECK_INTERVAL_MS,
        double_click_ms: DOUBLE_CLICK_TIME_MS,
        hold_ms: HOLD_TIME_MS,
    };

    /// Hold threshold expressed in button checks
    #[must_use]
    pub const fn hold_checks(&self) -> u16 {
        checks(self.hold_ms, self.check_interval_ms)
    }

    /// Double-click window expressed in button checks
    #[must_use]
    pub const fn double_click_checks(&self) -> u16 {
        checks(self.double_click_ms, self.check_interval_ms)
    }
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn checks(duration_ms: u32, interval_ms: u32) -> u16 {
    let interval = if interval_ms == 0 { 1 } else { interval_ms };
    let count = duration_ms / interval;
    if count > u16::MAX as u32 {
        u16::MAX
    } else {
        count as u16
    }
}

/// Shape of the acceleration curve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccelerationProfile {
    /// Upper bound of the counter
    pub ceiling: u16,
    /// Added on a tick with movement
    pub increment: u16,
    /// Subtracted on every tick
    pub decay: u16,
}

impl AccelerationProfile {
    /// Default curve for a 1 kHz service tick
    pub const DEFAULT: Self = Self {
        ceiling: ACCEL_CEILING,
        increment: ACCEL_INCREMENT,
        decay: ACCEL_DECAY,
    };

    /// Largest multiplier the curve can produce
    #[must_use]
    pub const fn max_multiplier(&self) -> u16 {
        self.ceiling >> ACCEL_SHIFT
    }

    /// Idle ticks needed to decay a saturated counter to zero
    ///
    /// Returns None when the curve never decays.
    #[must_use]
    pub const fn idle_ticks_to_zero(&self) -> Option<u32> {
        if self.decay == 0 {
            None
        } else {
            Some((self.ceiling as u32).div_ceil(self.decay as u32))
        }
    }
}

impl Default for AccelerationProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Encoder configuration applied at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Quarter-steps per detent
    pub steps_per_notch: StepsPerNotch,
    /// Level at which A, B and the button count as closed
    pub active_level: ActiveLevel,
    /// Start with acceleration enabled
    pub acceleration_enabled: bool,
    /// Start with double-click detection enabled
    pub double_click_enabled: bool,
    /// Quadrature decoding strategy
    pub decoder: DecoderKind,
    /// Button gesture timing
    pub timing: ButtonTiming,
    /// Acceleration curve
    pub acceleration: AccelerationProfile,
}

impl EncoderConfig {
    /// Default configuration: one step per notch, active-low contacts,
    /// acceleration and double click enabled, arithmetic decoding
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps_per_notch: StepsPerNotch::One,
            active_level: ActiveLevel::Low,
            acceleration_enabled: true,
            double_click_enabled: true,
            decoder: DecoderKind::Arithmetic,
            timing: ButtonTiming::DEFAULT,
            acceleration: AccelerationProfile::DEFAULT,
        }
    }

    /// Set steps per notch from a raw count; anything but 1, 2 or 4 means 1
    #[must_use]
    pub const fn with_steps_per_notch(mut self, count: u8) -> Self {
        self.steps_per_notch = StepsPerNotch::from_count_or_one(count);
        self
    }

    /// Set the active contact level
    #[must_use]
    pub const fn with_active_level(mut self, level: ActiveLevel) -> Self {
        self.active_level = level;
        self
    }

    /// Enable or disable acceleration
    #[must_use]
    pub const fn with_acceleration(mut self, enabled: bool) -> Self {
        self.acceleration_enabled = enabled;
        self
    }

    /// Enable or disable double-click detection
    #[must_use]
    pub const fn with_double_click(mut self, enabled: bool) -> Self {
        self.double_click_enabled = enabled;
        self
    }

    /// Select the decoding strategy
    #[must_use]
    pub const fn with_decoder(mut self, decoder: DecoderKind) -> Self {
        self.decoder = decoder;
        self
    }

    /// Override button timing
    #[must_use]
    pub const fn with_timing(mut self, timing: ButtonTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Override the acceleration curve
    #[must_use]
    pub const fn with_acceleration_profile(mut self, profile: AccelerationProfile) -> Self {
        self.acceleration = profile;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EncoderConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "EncoderConfig({}, {}, {}, accel={}, dblclick={})",
            self.steps_per_notch,
            self.active_level,
            self.decoder,
            self.acceleration_enabled,
            self.double_click_enabled
        );
    }
}
