//! Rotary Encoder Firmware Library
//!
//! Timer-serviced driver for a mechanical rotary encoder with a push
//! button, as used for tuning and menu navigation on a radio front panel.
//! A fast periodic tick decodes the quadrature contacts, tracks turning
//! speed and times the button; a slower main loop polls one snapshot at a
//! time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION (out of scope)                │
//! │     tuning  │  menus  │  display   ◄── EncoderState          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        DRIVER LAYER                          │
//! │   EncoderSampler (1 ms)  ──EncoderShared──►  EncoderReader   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                        INPUT LOGIC                           │
//! │  QuadratureDecoder │ AccelerationModel │ ButtonGesture       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    HAL (embedded-hal)                        │
//! │          InputPin A/B/SW  │  TickSource                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **No global state**: the shared block is an explicit value; the
//!   binary chooses to put it in a `static`
//! - **Injectable time**: the tick source is a trait, so synthetic pin
//!   sequences drive the same code the timer does
//! - **Silent fallbacks**: degenerate configuration degrades to defined
//!   behavior instead of failing
//! - **No unsafe**: sharing goes through `critical-section` and atomics

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Pin sampling and tick sources over `embedded-hal`.
pub mod hal;

/// Peripheral Drivers
///
/// The rotary encoder driver.
pub mod drivers;

/// Encoder Input Logic
///
/// Decoder, acceleration and button state machines.
pub mod input;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::drivers::encoder::{
        BoundedValue, EncoderReader, EncoderSampler, EncoderShared, RotaryEncoder,
    };
    pub use crate::hal::gpio::{EncoderPins, NoPin};
    #[cfg(feature = "embedded")]
    pub use crate::hal::timer::EmbassyTicks;
    pub use crate::hal::timer::{ServiceTicks, TickSource};
    pub use crate::types::*;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Ticker, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
