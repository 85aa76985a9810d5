//! Quadrature Decoder
//!
//! Turns sampled A/B contact phases into signed quarter-step deltas.
//! Two strategies are selectable at runtime:
//!
//! - **Arithmetic**: the Gray phase is converted to a 2-bit position and
//!   differenced against the last accepted position. An odd difference is a
//!   single edge, an even one is a double-bit jump and is ignored.
//! - **Table**: the phase is shifted into a 4-bit history that indexes a
//!   16-entry transition table derived from the Gray cycle.
//!
//! Both reject simultaneous changes on A and B (contact bounce). The
//! sequence `00 -> 10 -> 11 -> 01 -> 00` (bit 1 = A, bit 0 = B) counts up.
//!
//! Decoded deltas land in a [`DeltaAccumulator`] that the polling loop
//! drains in whole notches.

use core::cell::Cell;

use critical_section::Mutex;

use crate::types::{DecoderKind, StepsPerNotch};

/// Contact phases in forward rotation order
const GRAY_CYCLE: [u8; 4] = [0b00, 0b10, 0b11, 0b01];

/// Sampled phase of both contacts (bit 1 = A active, bit 0 = B active)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Phase(u8);

impl Phase {
    /// Build from the active state of both contacts
    #[must_use]
    pub const fn new(a: bool, b: bool) -> Self {
        let a_bit = if a { 0b10 } else { 0 };
        let b_bit = if b { 0b01 } else { 0 };
        Self(a_bit | b_bit)
    }

    /// Raw 2-bit value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Position along the Gray cycle, decreasing by one per forward edge
    const fn position(self) -> u8 {
        let a = if self.0 & 0b10 != 0 { 3 } else { 0 };
        let b = self.0 & 0b01;
        a ^ b
    }
}

/// The two most recent phases packed as `previous << 2 | current`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PhaseHistory(u8);

impl PhaseHistory {
    /// History whose most recent entry is `phase`
    #[must_use]
    pub const fn seeded(phase: Phase) -> Self {
        Self(phase.bits())
    }

    /// Shift in a new phase, dropping the oldest
    #[must_use]
    pub const fn push(self, phase: Phase) -> Self {
        Self(((self.0 << 2) | phase.bits()) & 0x0F)
    }

    /// Table index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mapping from [`PhaseHistory`] to a quarter-step delta
///
/// Zero entries mark no-change and double-bit transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTable([i8; 16]);

impl TransitionTable {
    /// Every valid edge counts
    pub const FULL_STEP: Self = Self::derive(1);

    /// Every second edge counts, for encoders whose detent sits between
    /// two Gray states and chatters
    pub const HALF_STEP: Self = Self::derive(2);

    /// Build a table from the Gray cycle, counting edges that leave every
    /// `stride`-th state in either direction
    const fn derive(stride: usize) -> Self {
        let mut table = [0i8; 16];
        let mut i = 0;
        while i < GRAY_CYCLE.len() {
            if i % stride == 0 {
                let from = GRAY_CYCLE[i];
                let to = GRAY_CYCLE[(i + 1) % GRAY_CYCLE.len()];
                table[((from << 2) | to) as usize] = 1;
                table[((to << 2) | from) as usize] = -1;
            }
            i += 1;
        }
        Self(table)
    }

    /// Delta for a history
    #[must_use]
    pub fn lookup(&self, history: PhaseHistory) -> i8 {
        self.0.get(history.index()).copied().unwrap_or(0)
    }

    /// Raw table entries
    #[must_use]
    pub const fn entries(&self) -> &[i8; 16] {
        &self.0
    }
}

/// Quadrature decoder producing -1/0/+1 per sample
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    kind: DecoderKind,
    /// Last accepted Gray position (arithmetic mode)
    last_position: u8,
    /// Recent phases (table modes)
    history: PhaseHistory,
}

impl QuadratureDecoder {
    /// Create a decoder resting at `initial`
    ///
    /// Seeding from the current contacts keeps an encoder parked between
    /// detents from reporting a phantom step on the first sample.
    #[must_use]
    pub const fn new(kind: DecoderKind, initial: Phase) -> Self {
        Self {
            kind,
            last_position: initial.position(),
            history: PhaseHistory::seeded(initial),
        }
    }

    /// Feed a new sample, returns the quarter-step delta
    pub fn update(&mut self, phase: Phase) -> i8 {
        match self.kind {
            DecoderKind::Arithmetic => self.step_arithmetic(phase),
            DecoderKind::FullStepTable => self.step_table(&TransitionTable::FULL_STEP, phase),
            DecoderKind::HalfStepTable => self.step_table(&TransitionTable::HALF_STEP, phase),
        }
    }

    fn step_arithmetic(&mut self, phase: Phase) -> i8 {
        let current = phase.position();
        let diff = self.last_position.wrapping_sub(current);

        // Even difference: no change, or both contacts flipped at once
        if diff & 1 == 0 {
            return 0;
        }

        self.last_position = current;
        if diff & 2 == 0 {
            1
        } else {
            -1
        }
    }

    fn step_table(&mut self, table: &TransitionTable, phase: Phase) -> i8 {
        self.history = self.history.push(phase);
        table.lookup(self.history)
    }

    /// Re-seed the decoder at `phase`
    pub fn reset(&mut self, phase: Phase) {
        *self = Self::new(self.kind, phase);
    }

    /// Active strategy
    #[must_use]
    pub const fn kind(&self) -> DecoderKind {
        self.kind
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(DecoderKind::default(), Phase::default())
    }
}

/// Pending quarter-steps not yet reported as whole notches
///
/// Written by the service tick and drained by the polling loop. Both sides
/// go through a critical section because the drain is read-then-store.
pub struct DeltaAccumulator {
    pending: Mutex<Cell<i16>>,
}

impl DeltaAccumulator {
    /// Create an empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(0)),
        }
    }

    /// Add a decoded delta (saturating)
    pub fn add(&self, delta: i8) {
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            pending.set(pending.get().saturating_add(i16::from(delta)));
        });
    }

    /// Drain whole notches, keeping the remainder for the next call
    ///
    /// Division truncates toward zero, so the sign of the result follows
    /// the rotation and the stored remainder stays within one notch.
    pub fn take_notches(&self, steps: StepsPerNotch) -> i16 {
        let per_notch = steps.count();
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            let value = pending.get();
            pending.set(value % per_notch);
            value / per_notch
        })
    }

    /// Quarter-steps currently pending
    #[must_use]
    pub fn pending(&self) -> i16 {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }

    /// Discard pending motion
    pub fn clear(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(0));
    }
}

impl Default for DeltaAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
