//! Button Gesture Detector
//!
//! Classifies one debounced push button into press, hold, release, click
//! and double-click. The detector runs on its own check interval (10 ms by
//! default) from inside the service tick; the interval doubles as the
//! debounce time.
//!
//! ```text
//!   Open ──down──► Pressed ──down > hold──► Held ──up──► Released
//!                     │
//!                     up (tap)
//!                     ▼
//!        window open? ──yes──► DoubleClicked
//!                     │no
//!                     ▼
//!              open window ──expires──► Clicked
//! ```
//!
//! Results are published through a [`ButtonLatch`] that the polling loop
//! drains. `Pressed` is only offered to an empty latch; every other
//! gesture replaces what is pending.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::ButtonTiming;
use crate::types::ButtonState;

/// Gesture shared between the service tick and the polling loop
pub struct ButtonLatch(AtomicU8);

impl ButtonLatch {
    /// Create an `Open` latch
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(ButtonState::Open.as_u8()))
    }

    /// Publish a gesture, replacing whatever was pending
    pub fn raise(&self, state: ButtonState) {
        self.0.store(state.as_u8(), Ordering::Release);
    }

    /// Publish a gesture only if nothing is pending, returns true if it
    /// was stored
    pub fn offer(&self, state: ButtonState) -> bool {
        self.0
            .compare_exchange(
                ButtonState::Open.as_u8(),
                state.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Current gesture without consuming it
    #[must_use]
    pub fn peek(&self) -> ButtonState {
        ButtonState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Consume the current gesture
    ///
    /// Every state except `Held` is reset to `Open`. The reset only lands
    /// if the latch still holds what was read, so a gesture raised in
    /// between survives until the next poll.
    pub fn take(&self) -> ButtonState {
        let raw = self.0.load(Ordering::Acquire);
        let state = ButtonState::from_u8(raw);
        if !state.is_open() && !state.is_latched() {
            // Losing the race means a newer gesture is pending; keep it
            let _ = self.0.compare_exchange(
                raw,
                ButtonState::Open.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            );
        }
        state
    }

    /// Force the latch back to `Open`
    pub fn clear(&self) {
        self.raise(ButtonState::Open);
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Window counter value meaning no tap is pending
const WINDOW_CLOSED: u16 = 0;

/// Producer-side gesture timing
#[derive(Clone, Copy, Debug)]
pub struct ButtonGestureDetector {
    timing: ButtonTiming,
    /// Consecutive checks with the button down
    key_down_ticks: u16,
    /// Remaining checks in the double-click window
    double_click_ticks: u16,
    /// Timestamp of the last check
    last_check_ms: u32,
}

impl ButtonGestureDetector {
    /// Create an idle detector
    #[must_use]
    pub const fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            key_down_ticks: 0,
            double_click_ticks: WINDOW_CLOSED,
            last_check_ms: 0,
        }
    }

    /// Whether a check is due at `now_ms`
    #[must_use]
    pub const fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_check_ms) >= self.timing.check_interval_ms
    }

    /// Run one check with the debounced button level
    ///
    /// Returns the gesture to publish, if any. `Held` is returned on every
    /// check while the hold lasts so the latch stays set.
    pub fn check(
        &mut self,
        now_ms: u32,
        pressed: bool,
        double_click_enabled: bool,
    ) -> Option<ButtonState> {
        self.last_check_ms = now_ms;
        let mut event = None;

        if pressed {
            self.key_down_ticks = self.key_down_ticks.saturating_add(1);
            if self.is_held() {
                event = Some(ButtonState::Held);
            } else if self.key_down_ticks == 1 {
                event = Some(ButtonState::Pressed);
            }
        } else if self.key_down_ticks > 0 {
            event = self.release(double_click_enabled);
        }

        if self.double_click_ticks > WINDOW_CLOSED {
            self.double_click_ticks -= 1;
            if self.double_click_ticks == WINDOW_CLOSED {
                event = Some(ButtonState::Clicked);
            }
        }

        event
    }

    fn release(&mut self, double_click_enabled: bool) -> Option<ButtonState> {
        let was_held = self.is_held();
        self.key_down_ticks = 0;

        if was_held {
            self.double_click_ticks = WINDOW_CLOSED;
            return Some(ButtonState::Released);
        }

        if !double_click_enabled {
            return Some(ButtonState::Clicked);
        }

        if self.double_click_ticks > WINDOW_CLOSED {
            self.double_click_ticks = WINDOW_CLOSED;
            Some(ButtonState::DoubleClicked)
        } else {
            // Counted down starting with this check
            self.double_click_ticks = self.timing.double_click_checks().max(1).saturating_add(1);
            None
        }
    }

    /// Whether the current press has passed the hold threshold
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.key_down_ticks > self.timing.hold_checks()
    }

    /// Whether a double-click window is open
    #[must_use]
    pub const fn window_open(&self) -> bool {
        self.double_click_ticks > WINDOW_CLOSED
    }

    /// Checks the button has been down
    #[must_use]
    pub const fn key_down_ticks(&self) -> u16 {
        self.key_down_ticks
    }

    /// Return to idle
    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }
}

impl Default for ButtonGestureDetector {
    fn default() -> Self {
        Self::new(ButtonTiming::DEFAULT)
    }
}
