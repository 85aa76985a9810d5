//! Timer Abstractions
//!
//! The service tick needs a millisecond timestamp to pace button checks.
//! [`TickSource`] keeps that clock injectable so the decoder and gesture
//! logic run the same way under a timer interrupt, an Embassy task, or a
//! synthetic test sequence.

/// Monotonic millisecond clock, allowed to wrap
pub trait TickSource {
    /// Current time in milliseconds
    fn now_ms(&mut self) -> u32;
}

impl<F: FnMut() -> u32> TickSource for F {
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Virtual clock advanced by one service period per reading
///
/// Suits a fixed-cadence interrupt that has no free-running timer at
/// hand: the sampler reads the clock once per `service()`, so time is the
/// number of service calls times the period.
#[derive(Clone, Copy, Debug)]
pub struct ServiceTicks {
    now_ms: u32,
    period_ms: u32,
}

impl ServiceTicks {
    /// Start at zero with the given service period
    #[must_use]
    pub const fn new(period_ms: u32) -> Self {
        Self {
            now_ms: 0,
            period_ms,
        }
    }

    /// Time of the next reading without advancing
    #[must_use]
    pub const fn peek(&self) -> u32 {
        self.now_ms
    }
}

impl Default for ServiceTicks {
    fn default() -> Self {
        Self::new(crate::config::SERVICE_INTERVAL_MS)
    }
}

impl TickSource for ServiceTicks {
    fn now_ms(&mut self) -> u32 {
        let now = self.now_ms;
        self.now_ms = self.now_ms.wrapping_add(self.period_ms);
        now
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ServiceTicks {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ServiceTicks({}ms, every {}ms)", self.now_ms, self.period_ms);
    }
}

/// Embassy time driver as a tick source
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyTicks;

#[cfg(feature = "embedded")]
impl EmbassyTicks {
    /// Create the tick source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(feature = "embedded")]
impl TickSource for EmbassyTicks {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&mut self) -> u32 {
        // Wraps after ~49 days; button pacing uses wrapping differences
        embassy_time::Instant::now().as_millis() as u32
    }
}
