//! Peripheral Drivers
//!
//! High-level drivers built on the HAL layer and the input state machines.

pub mod encoder;
