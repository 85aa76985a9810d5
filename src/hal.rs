//! Hardware Abstraction Layer
//!
//! Pin sampling and time sources for the encoder. Everything is written
//! against `embedded-hal` traits so the same code drives STM32 GPIO on the
//! target and fake pins on the host.

pub mod gpio;
pub mod timer;
