//! Encoder Input Logic
//!
//! Hardware-independent state machines driven by the service tick:
//! quadrature decoding, acceleration and button gestures. Nothing here
//! touches a pin or a clock, so every module runs on the host.

pub mod acceleration;
pub mod button;
pub mod decoder;
