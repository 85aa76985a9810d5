//! GPIO Abstractions
//!
//! Semantic wrappers over `embedded-hal` input pins for the encoder
//! contacts. Pins are sampled directly by the service tick; a failed read
//! counts as the inactive level.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::input::decoder::Phase;
use crate::types::ActiveLevel;

/// Whether `pin` currently sits at `level`
pub fn is_active<P: InputPin>(pin: &mut P, level: ActiveLevel) -> bool {
    pin.is_high()
        .map(|high| level.is_active(high))
        .unwrap_or(false)
}

/// Placeholder pin type for an encoder without a push button
///
/// Only names the button type in `EncoderPins<A, B, NoPin>`; it is never
/// sampled.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// A/B quadrature contacts
pub struct PhasePins<A, B> {
    a: A,
    b: B,
    level: ActiveLevel,
}

impl<A: InputPin, B: InputPin> PhasePins<A, B> {
    /// Wrap both phase inputs
    #[must_use]
    pub fn new(a: A, b: B, level: ActiveLevel) -> Self {
        Self { a, b, level }
    }

    /// Sample both contacts
    pub fn sample(&mut self) -> Phase {
        let a = is_active(&mut self.a, self.level);
        let b = is_active(&mut self.b, self.level);
        Phase::new(a, b)
    }

    /// Give the pins back
    pub fn release(self) -> (A, B) {
        (self.a, self.b)
    }
}

/// Encoder push button
pub struct EncoderButton<K> {
    pin: K,
    level: ActiveLevel,
}

impl<K: InputPin> EncoderButton<K> {
    /// Wrap the button input
    #[must_use]
    pub fn new(pin: K, level: ActiveLevel) -> Self {
        Self { pin, level }
    }

    /// Check if the contact is closed
    pub fn is_pressed(&mut self) -> bool {
        is_active(&mut self.pin, self.level)
    }

    /// Give the pin back
    pub fn release(self) -> K {
        self.pin
    }
}

/// The three encoder lines handed over at construction
pub struct EncoderPins<A, B, K> {
    /// Phase A (CLK)
    pub a: A,
    /// Phase B (DT)
    pub b: B,
    /// Push button (SW), if fitted
    pub button: Option<K>,
}

impl<A, B, K> EncoderPins<A, B, K> {
    /// Encoder with a push button
    #[must_use]
    pub fn new(a: A, b: B, button: K) -> Self {
        Self {
            a,
            b,
            button: Some(button),
        }
    }
}

impl<A, B> EncoderPins<A, B, NoPin> {
    /// Encoder without a push button; gesture detection is disabled
    #[must_use]
    pub fn without_button(a: A, b: B) -> Self {
        Self { a, b, button: None }
    }
}
