//! Shared types used across the encoder firmware
//!
//! This module defines the values exchanged between the service tick,
//! the polling loop and the application: the per-poll snapshot, the
//! gesture states and the small configuration enums that replace raw
//! integers at the API boundary.

/// Rotation direction reported by a single poll
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// No rotation since the last poll
    #[default]
    None,
    /// Rotation towards higher values
    Up,
    /// Rotation towards lower values
    Down,
}

impl Direction {
    /// Direction of a signed movement
    #[must_use]
    pub const fn from_delta(delta: i32) -> Self {
        if delta > 0 {
            Self::Up
        } else if delta < 0 {
            Self::Down
        } else {
            Self::None
        }
    }

    /// Sign of the direction (+1, -1 or 0)
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// True for `Up` and `Down`
    #[must_use]
    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Opposite direction (`None` stays `None`)
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::None => defmt::write!(f, "-"),
            Self::Up => defmt::write!(f, "UP"),
            Self::Down => defmt::write!(f, "DOWN"),
        }
    }
}

/// Push button gesture
///
/// At most one state is current at any tick. `Held` stays latched while
/// the button is down; every other non-`Open` state is reported once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ButtonState {
    /// Nothing to report
    #[default]
    Open = 0,
    /// Button went down
    Pressed = 1,
    /// Button has been down longer than the hold threshold
    Held = 2,
    /// Button came up after a hold
    Released = 3,
    /// Single tap, double-click window expired
    Clicked = 4,
    /// Second tap inside the double-click window
    DoubleClicked = 5,
}

impl ButtonState {
    /// Raw representation used by the shared latch
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw latch value; unknown values read as `Open`
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Pressed,
            2 => Self::Held,
            3 => Self::Released,
            4 => Self::Clicked,
            5 => Self::DoubleClicked,
            _ => Self::Open,
        }
    }

    /// True when there is nothing to report
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// True for states that survive a read (only `Held`)
    #[must_use]
    pub const fn is_latched(self) -> bool {
        matches!(self, Self::Held)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Open => defmt::write!(f, "Open"),
            Self::Pressed => defmt::write!(f, "Pressed"),
            Self::Held => defmt::write!(f, "Held"),
            Self::Released => defmt::write!(f, "Released"),
            Self::Clicked => defmt::write!(f, "Clicked"),
            Self::DoubleClicked => defmt::write!(f, "DoubleClicked"),
        }
    }
}

/// Snapshot returned by every poll
///
/// Motion and button gestures are mutually exclusive: when
/// `button_state` is not `Open`, `direction` is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EncoderState {
    /// Rotation since the previous poll
    pub direction: Direction,
    /// Current button gesture
    pub button_state: ButtonState,
    /// Accelerated magnitude of the rotation (0 when `direction` is `None`)
    pub steps: u16,
}

impl EncoderState {
    /// Nothing happened
    pub const IDLE: Self = Self {
        direction: Direction::None,
        button_state: ButtonState::Open,
        steps: 0,
    };

    /// Snapshot carrying a button gesture and no motion
    #[must_use]
    pub const fn button(button_state: ButtonState) -> Self {
        Self {
            direction: Direction::None,
            button_state,
            steps: 0,
        }
    }

    /// Snapshot carrying a signed movement
    #[must_use]
    pub const fn motion(delta: i32) -> Self {
        Self {
            direction: Direction::from_delta(delta),
            button_state: ButtonState::Open,
            steps: saturate_u16(delta.unsigned_abs()),
        }
    }

    /// True when neither motion nor a gesture is reported
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.direction.is_moving() && self.button_state.is_open()
    }

    /// Movement as a signed step count
    #[must_use]
    pub const fn signed_steps(&self) -> i32 {
        self.direction.sign() * self.steps as i32
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EncoderState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Encoder({} x{}, {})",
            self.direction,
            self.steps,
            self.button_state
        );
    }
}

const fn saturate_u16(value: u32) -> u16 {
    if value > u16::MAX as u32 {
        u16::MAX
    } else {
        value as u16
    }
}

/// Quarter-step transitions per mechanical detent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepsPerNotch {
    /// Every valid transition is a notch
    #[default]
    One,
    /// Two transitions per notch
    Two,
    /// A full Gray-code cycle per notch
    Four,
}

impl StepsPerNotch {
    /// Create from a raw count, returns None unless the count is 1, 2 or 4
    #[must_use]
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            _ => None,
        }
    }

    /// Create from a raw count, degrading to one step per notch
    #[must_use]
    pub const fn from_count_or_one(count: u8) -> Self {
        match Self::from_count(count) {
            Some(steps) => steps,
            None => Self::One,
        }
    }

    /// Number of quarter-steps in one notch
    #[must_use]
    pub const fn count(self) -> i16 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for StepsPerNotch {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}/notch", self.count());
    }
}

/// Electrical level at which a contact counts as closed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveLevel {
    /// Contact pulls the line to ground (internal pull-up)
    #[default]
    Low,
    /// Contact drives the line high (pull-down)
    High,
}

impl ActiveLevel {
    /// Whether a line reading `is_high` is at the active level
    #[must_use]
    pub const fn is_active(self, is_high: bool) -> bool {
        match self {
            Self::Low => !is_high,
            Self::High => is_high,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ActiveLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "active-low"),
            Self::High => defmt::write!(f, "active-high"),
        }
    }
}

/// Quadrature decoding strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DecoderKind {
    /// Gray-code differencing against the last accepted phase
    #[default]
    Arithmetic,
    /// Transition table counting every valid edge
    FullStepTable,
    /// Transition table counting two edges per cycle (flaky detents)
    HalfStepTable,
}

#[cfg(feature = "embedded")]
impl defmt::Format for DecoderKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Arithmetic => defmt::write!(f, "arithmetic"),
            Self::FullStepTable => defmt::write!(f, "table/full"),
            Self::HalfStepTable => defmt::write!(f, "table/half"),
        }
    }
}
