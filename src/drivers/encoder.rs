//! Rotary Encoder Driver
//!
//! Timer-serviced quadrature encoder with acceleration and
//! click / double-click / hold detection.
//!
//! The driver has two halves:
//!
//! - [`EncoderSampler`] owns the pins and runs [`EncoderSampler::service`]
//!   at a fixed cadence (1 ms), from a timer interrupt or a ticker task.
//! - [`EncoderReader`] runs [`EncoderReader::read`] from the main loop and
//!   turns whatever accumulated into one [`EncoderState`] per call.
//!
//! They only meet in an [`EncoderShared`] block, which can live in a
//! `static`. [`RotaryEncoder`] bundles both halves for callers that service
//! and poll from one place.
//!
//! Motion that spans several notches between two polls is collapsed into a
//! single `Up`/`Down`; its accelerated size is reported in
//! [`EncoderState::steps`].

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::InputPin;

use crate::config::EncoderConfig;
use crate::hal::gpio::{EncoderButton, EncoderPins, PhasePins};
use crate::hal::timer::TickSource;
use crate::input::acceleration::AccelerationModel;
use crate::input::button::{ButtonGestureDetector, ButtonLatch};
use crate::input::decoder::{DeltaAccumulator, QuadratureDecoder};
use crate::types::{ButtonState, EncoderState, StepsPerNotch};

/// State written by the service tick and read by the polling loop
pub struct EncoderShared {
    accumulator: DeltaAccumulator,
    acceleration: AccelerationModel,
    button: ButtonLatch,
    double_click_enabled: AtomicBool,
}

impl EncoderShared {
    /// Create the shared block for `config`
    #[must_use]
    pub const fn new(config: &EncoderConfig) -> Self {
        Self {
            accumulator: DeltaAccumulator::new(),
            acceleration: AccelerationModel::new(config.acceleration, config.acceleration_enabled),
            button: ButtonLatch::new(),
            double_click_enabled: AtomicBool::new(config.double_click_enabled),
        }
    }

    /// Pending quarter-steps
    #[must_use]
    pub fn accumulator(&self) -> &DeltaAccumulator {
        &self.accumulator
    }

    /// Acceleration state
    #[must_use]
    pub fn acceleration(&self) -> &AccelerationModel {
        &self.acceleration
    }

    /// Latched button gesture
    #[must_use]
    pub fn button(&self) -> &ButtonLatch {
        &self.button
    }

    /// Whether double-click detection is on
    #[must_use]
    pub fn double_click_enabled(&self) -> bool {
        self.double_click_enabled.load(Ordering::Relaxed)
    }

    fn set_double_click_enabled(&self, enabled: bool) {
        self.double_click_enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for EncoderShared {
    fn default() -> Self {
        Self::new(&EncoderConfig::new())
    }
}

/// Producer half: samples the pins on every service tick
pub struct EncoderSampler<'s, A, B, K, C> {
    shared: &'s EncoderShared,
    phases: PhasePins<A, B>,
    button: Option<EncoderButton<K>>,
    decoder: QuadratureDecoder,
    gestures: ButtonGestureDetector,
    /// `Pressed` waiting for the consumer to drain an earlier gesture
    press_pending: bool,
    clock: C,
}

impl<'s, A, B, K, C> EncoderSampler<'s, A, B, K, C>
where
    A: InputPin,
    B: InputPin,
    K: InputPin,
    C: TickSource,
{
    /// Take ownership of the pins and seed the decoder from their
    /// current state
    pub fn new(
        shared: &'s EncoderShared,
        pins: EncoderPins<A, B, K>,
        clock: C,
        config: &EncoderConfig,
    ) -> Self {
        let mut phases = PhasePins::new(pins.a, pins.b, config.active_level);
        let initial = phases.sample();

        Self {
            shared,
            phases,
            button: pins
                .button
                .map(|pin| EncoderButton::new(pin, config.active_level)),
            decoder: QuadratureDecoder::new(config.decoder, initial),
            gestures: ButtonGestureDetector::new(config.timing),
            press_pending: false,
            clock,
        }
    }

    /// One service tick: decode, update acceleration, check the button
    /// when its interval has elapsed
    pub fn service(&mut self) {
        let now_ms = self.clock.now_ms();

        let delta = self.decoder.update(self.phases.sample());
        if delta != 0 {
            self.shared.accumulator.add(delta);
        }
        self.shared.acceleration.tick(delta != 0);

        let Some(button) = self.button.as_mut() else {
            return;
        };
        if self.press_pending {
            self.press_pending = !self.shared.button.offer(ButtonState::Pressed);
        }
        if self.gestures.is_due(now_ms) {
            let pressed = button.is_pressed();
            let double_click = self.shared.double_click_enabled();
            if let Some(gesture) = self.gestures.check(now_ms, pressed, double_click) {
                self.publish(gesture);
            }
        }
    }

    /// Hand a gesture to the latch without losing an unread one
    ///
    /// `Pressed` waits until the latch is empty. Any other gesture
    /// replaces the latch and supersedes a waiting press.
    fn publish(&mut self, gesture: ButtonState) {
        if gesture == ButtonState::Pressed {
            self.press_pending = !self.shared.button.offer(gesture);
        } else {
            self.press_pending = false;
            self.shared.button.raise(gesture);
        }
    }

    /// Whether a push button was supplied
    #[must_use]
    pub fn has_button(&self) -> bool {
        self.button.is_some()
    }

    /// Stop sampling and give the pins back
    pub fn release(self) -> EncoderPins<A, B, K> {
        let (a, b) = self.phases.release();
        EncoderPins {
            a,
            b,
            button: self.button.map(EncoderButton::release),
        }
    }
}

/// Consumer half: produces one snapshot per poll
pub struct EncoderReader<'s> {
    shared: &'s EncoderShared,
    steps_per_notch: StepsPerNotch,
    /// Running accelerated position
    value: i32,
    /// Position at the last reported movement
    last_reported: i32,
}

impl<'s> EncoderReader<'s> {
    /// Create a reader over `shared`
    #[must_use]
    pub const fn new(shared: &'s EncoderShared, config: &EncoderConfig) -> Self {
        Self {
            shared,
            steps_per_notch: config.steps_per_notch,
            value: 0,
            last_reported: 0,
        }
    }

    /// Poll the encoder
    ///
    /// The button is checked first; a pending gesture wins and leaves any
    /// motion queued for a later poll.
    pub fn read(&mut self) -> EncoderState {
        let button_state = self.button();
        if !button_state.is_open() {
            return EncoderState::button(button_state);
        }

        self.value = self.value.wrapping_add(i32::from(self.value_delta()));
        let moved = self.value.wrapping_sub(self.last_reported);
        self.last_reported = self.value;

        EncoderState::motion(moved)
    }

    /// Drain whole notches and scale them by the acceleration multiplier
    fn value_delta(&self) -> i16 {
        let notches = self.shared.accumulator.take_notches(self.steps_per_notch);
        self.shared.acceleration.scale(notches)
    }

    /// Consume the latched gesture (`Held` stays latched)
    fn button(&self) -> ButtonState {
        self.shared.button.take()
    }

    /// Running position: the sum of all reported movement
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.value
    }

    /// Enable or disable acceleration; disabling drops the current velocity
    pub fn set_acceleration_enabled(&self, enabled: bool) {
        self.shared.acceleration.set_enabled(enabled);
    }

    /// Whether acceleration is enabled
    #[must_use]
    pub fn acceleration_enabled(&self) -> bool {
        self.shared.acceleration.is_enabled()
    }

    /// Enable or disable double-click detection
    pub fn set_double_click_enabled(&self, enabled: bool) {
        self.shared.set_double_click_enabled(enabled);
    }

    /// Whether double-click detection is enabled
    #[must_use]
    pub fn double_click_enabled(&self) -> bool {
        self.shared.double_click_enabled()
    }
}

/// Complete encoder driver serviced and polled by one owner
pub struct RotaryEncoder<'s, A, B, K, C> {
    sampler: EncoderSampler<'s, A, B, K, C>,
    reader: EncoderReader<'s>,
}

impl<'s, A, B, K, C> RotaryEncoder<'s, A, B, K, C>
where
    A: InputPin,
    B: InputPin,
    K: InputPin,
    C: TickSource,
{
    /// Create an encoder driver
    pub fn new(
        shared: &'s EncoderShared,
        pins: EncoderPins<A, B, K>,
        clock: C,
        config: &EncoderConfig,
    ) -> Self {
        Self {
            sampler: EncoderSampler::new(shared, pins, clock, config),
            reader: EncoderReader::new(shared, config),
        }
    }

    /// Service tick (call every [`crate::config::SERVICE_INTERVAL_MS`])
    pub fn service(&mut self) {
        self.sampler.service();
    }

    /// Poll for the current state
    pub fn read(&mut self) -> EncoderState {
        self.reader.read()
    }

    /// Enable or disable acceleration
    pub fn set_acceleration_enabled(&self, enabled: bool) {
        self.reader.set_acceleration_enabled(enabled);
    }

    /// Whether acceleration is enabled
    #[must_use]
    pub fn acceleration_enabled(&self) -> bool {
        self.reader.acceleration_enabled()
    }

    /// Enable or disable double-click detection
    pub fn set_double_click_enabled(&self, enabled: bool) {
        self.reader.set_double_click_enabled(enabled);
    }

    /// Whether double-click detection is enabled
    #[must_use]
    pub fn double_click_enabled(&self) -> bool {
        self.reader.double_click_enabled()
    }

    /// Running position
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.reader.position()
    }

    /// Tear down the driver and give the pins back
    pub fn release(self) -> EncoderPins<A, B, K> {
        self.sampler.release()
    }

    /// Split into the service and polling halves
    pub fn split(self) -> (EncoderSampler<'s, A, B, K, C>, EncoderReader<'s>) {
        (self.sampler, self.reader)
    }
}

/// Integer moved by encoder snapshots and held within fixed bounds
#[derive(Clone, Copy, Debug)]
pub struct BoundedValue<T> {
    value: T,
    min: T,
    max: T,
}

impl<T: Copy + Ord> BoundedValue<T> {
    /// Bound `value` to the range spanned by `a` and `b`, in either order
    #[must_use]
    pub fn new(value: T, a: T, b: T) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Current value
    #[must_use]
    pub const fn get(&self) -> T {
        self.value
    }

    /// Inclusive bounds
    #[must_use]
    pub const fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// Store `value`, clamped to the bounds
    pub fn set(&mut self, value: T) {
        self.value = value.clamp(self.min, self.max);
    }
}

impl BoundedValue<i32> {
    /// Apply the motion in an encoder snapshot, returns true if the value
    /// changed
    pub fn apply(&mut self, state: EncoderState) -> bool {
        let before = self.value;
        self.set(self.value.saturating_add(state.signed_steps()));
        self.value != before
    }
}
