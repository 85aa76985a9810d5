//! Quadrature Decoder Tests
//!
//! Tests for both decoding strategies and the notch accumulator.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test decoder_tests

use encoder_firmware::input::decoder::{
    DeltaAccumulator, Phase, PhaseHistory, QuadratureDecoder, TransitionTable,
};
use encoder_firmware::types::{DecoderKind, StepsPerNotch};

/// Forward rotation: 00 -> 10 -> 11 -> 01 (A, B)
const FORWARD: [(bool, bool); 4] = [(false, false), (true, false), (true, true), (false, true)];

const ALL_KINDS: [DecoderKind; 3] = [
    DecoderKind::Arithmetic,
    DecoderKind::FullStepTable,
    DecoderKind::HalfStepTable,
];

fn phase((a, b): (bool, bool)) -> Phase {
    Phase::new(a, b)
}

/// Walk `edges` transitions from 00, forward when positive
fn walk(decoder: &mut QuadratureDecoder, edges: i32) -> Vec<i8> {
    let mut index: i32 = 0;
    let mut out = Vec::new();
    for _ in 0..edges.unsigned_abs() {
        index += edges.signum();
        let (a, b) = FORWARD[index.rem_euclid(4) as usize];
        out.push(decoder.update(Phase::new(a, b)));
    }
    out
}

/// Small deterministic generator for pseudo-random walks
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.0 >> 16
    }
}

// =============================================================================
// Transition Table Tests
// =============================================================================

#[test]
fn full_step_table_matches_gray_cycle() {
    assert_eq!(
        TransitionTable::FULL_STEP.entries(),
        &[0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0]
    );
}

#[test]
fn half_step_table_counts_two_edges() {
    assert_eq!(
        TransitionTable::HALF_STEP.entries(),
        &[0, 0, 1, 0, 0, 0, 0, -1, -1, 0, 0, 0, 0, 1, 0, 0]
    );
}

#[test]
fn double_bit_entries_are_zero() {
    // 00<->11 and 01<->10
    for index in [0b0011, 0b1100, 0b0110, 0b1001] {
        let history = PhaseHistory::seeded(Phase::new(index & 0b1000 != 0, index & 0b0100 != 0))
            .push(Phase::new(index & 0b0010 != 0, index & 0b0001 != 0));
        assert_eq!(TransitionTable::FULL_STEP.lookup(history), 0);
        assert_eq!(TransitionTable::HALF_STEP.lookup(history), 0);
    }
}

// =============================================================================
// Decoder Tests
// =============================================================================

#[test]
fn decoder_no_change_no_step() {
    for kind in ALL_KINDS {
        let mut decoder = QuadratureDecoder::new(kind, Phase::default());
        assert_eq!(decoder.update(Phase::default()), 0);
    }
}

#[test]
fn arithmetic_forward_cycle() {
    let mut decoder = QuadratureDecoder::new(DecoderKind::Arithmetic, Phase::default());
    assert_eq!(walk(&mut decoder, 4), vec![1, 1, 1, 1]);
}

#[test]
fn arithmetic_reverse_cycle() {
    let mut decoder = QuadratureDecoder::new(DecoderKind::Arithmetic, Phase::default());
    assert_eq!(walk(&mut decoder, -4), vec![-1, -1, -1, -1]);
}

#[test]
fn full_table_forward_and_reverse() {
    let mut decoder = QuadratureDecoder::new(DecoderKind::FullStepTable, Phase::default());
    assert_eq!(walk(&mut decoder, 4), vec![1, 1, 1, 1]);

    let mut decoder = QuadratureDecoder::new(DecoderKind::FullStepTable, Phase::default());
    assert_eq!(walk(&mut decoder, -4), vec![-1, -1, -1, -1]);
}

#[test]
fn half_table_two_counts_per_cycle() {
    let mut decoder = QuadratureDecoder::new(DecoderKind::HalfStepTable, Phase::default());
    let total: i32 = walk(&mut decoder, 8).iter().map(|&d| i32::from(d)).sum();
    assert_eq!(total, 4);

    let mut decoder = QuadratureDecoder::new(DecoderKind::HalfStepTable, Phase::default());
    let total: i32 = walk(&mut decoder, -8).iter().map(|&d| i32::from(d)).sum();
    assert_eq!(total, -4);
}

#[test]
fn double_bit_jump_is_ignored() {
    for kind in ALL_KINDS {
        let mut decoder = QuadratureDecoder::new(kind, Phase::new(false, false));
        assert_eq!(decoder.update(Phase::new(true, true)), 0, "{kind:?}");

        let mut decoder = QuadratureDecoder::new(kind, Phase::new(true, false));
        assert_eq!(decoder.update(Phase::new(false, true)), 0, "{kind:?}");
    }
}

#[test]
fn arithmetic_recovers_after_bounce() {
    // The jump is rejected, so the decoder keeps its last good position
    let mut decoder = QuadratureDecoder::new(DecoderKind::Arithmetic, Phase::new(false, false));
    assert_eq!(decoder.update(Phase::new(true, true)), 0);
    assert_eq!(decoder.update(Phase::new(false, false)), 0);
    assert_eq!(decoder.update(Phase::new(true, false)), 1);
}

#[test]
fn seeded_decoder_has_no_phantom_step() {
    for kind in ALL_KINDS {
        let mut decoder = QuadratureDecoder::new(kind, Phase::new(true, true));
        assert_eq!(decoder.update(Phase::new(true, true)), 0, "{kind:?}");
        // 11 -> 01 is a forward edge
        assert_eq!(decoder.update(Phase::new(false, true)), 1, "{kind:?}");
    }
}

#[test]
fn arithmetic_and_table_agree_on_valid_walks() {
    let mut rng = Lcg(0x5EED);
    let mut arithmetic = QuadratureDecoder::new(DecoderKind::Arithmetic, Phase::default());
    let mut table = QuadratureDecoder::new(DecoderKind::FullStepTable, Phase::default());
    let mut index: i32 = 0;

    for _ in 0..2_000 {
        // Stay, step forward or step back
        index += match rng.next() % 3 {
            0 => 0,
            1 => 1,
            _ => -1,
        };
        let sample = phase(FORWARD[index.rem_euclid(4) as usize]);
        assert_eq!(arithmetic.update(sample), table.update(sample));
    }
}

#[test]
fn decoder_reset_reseeds() {
    let mut decoder = QuadratureDecoder::new(DecoderKind::FullStepTable, Phase::default());
    decoder.update(Phase::new(true, false));
    decoder.reset(Phase::new(false, true));
    assert_eq!(decoder.update(Phase::new(false, true)), 0);
    assert_eq!(decoder.kind(), DecoderKind::FullStepTable);
}

// =============================================================================
// Accumulator Tests
// =============================================================================

fn accumulate(acc: &DeltaAccumulator, edges: i32) {
    let delta: i8 = if edges > 0 { 1 } else { -1 };
    for _ in 0..edges.unsigned_abs() {
        acc.add(delta);
    }
}

#[test]
fn four_steps_per_notch_needs_four_edges() {
    let acc = DeltaAccumulator::new();
    accumulate(&acc, 3);
    assert_eq!(acc.take_notches(StepsPerNotch::Four), 0);
    assert_eq!(acc.pending(), 3);

    accumulate(&acc, 1);
    assert_eq!(acc.take_notches(StepsPerNotch::Four), 1);
    assert_eq!(acc.pending(), 0);
}

#[test]
fn reverse_rotation_truncates_toward_zero() {
    let acc = DeltaAccumulator::new();
    accumulate(&acc, -3);
    assert_eq!(acc.take_notches(StepsPerNotch::Four), 0);

    accumulate(&acc, -2);
    assert_eq!(acc.take_notches(StepsPerNotch::Four), -1);
    assert_eq!(acc.pending(), -1);
}

#[test]
fn two_steps_per_notch_keeps_remainder() {
    let acc = DeltaAccumulator::new();
    accumulate(&acc, 5);
    assert_eq!(acc.take_notches(StepsPerNotch::Two), 2);
    assert_eq!(acc.pending(), 1);
}

#[test]
fn one_step_per_notch_drains_everything() {
    let acc = DeltaAccumulator::new();
    accumulate(&acc, -7);
    assert_eq!(acc.take_notches(StepsPerNotch::One), -7);
    assert_eq!(acc.pending(), 0);
}

#[test]
fn interleaved_drains_lose_nothing() {
    let mut rng = Lcg(42);
    for steps in [StepsPerNotch::One, StepsPerNotch::Two, StepsPerNotch::Four] {
        let acc = DeltaAccumulator::new();
        let mut added: i32 = 0;
        let mut drained: i32 = 0;

        for _ in 0..5_000 {
            if rng.next() % 5 == 0 {
                drained += i32::from(acc.take_notches(steps)) * i32::from(steps.count());
                assert!(i32::from(acc.pending()).abs() < i32::from(steps.count()));
            } else {
                let delta: i8 = if rng.next() % 3 == 0 { -1 } else { 1 };
                acc.add(delta);
                added += i32::from(delta);
            }
        }

        assert_eq!(drained + i32::from(acc.pending()), added, "{steps:?}");
    }
}

#[test]
fn accumulator_saturates() {
    let acc = DeltaAccumulator::new();
    for _ in 0..40_000 {
        acc.add(1);
    }
    assert_eq!(acc.pending(), i16::MAX);
}

#[test]
fn accumulator_clear() {
    let acc = DeltaAccumulator::new();
    accumulate(&acc, 3);
    acc.clear();
    assert_eq!(acc.pending(), 0);
}
