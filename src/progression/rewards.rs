//! Reward shaping: XP penalties applied before a result reaches the
//! progression state machine.
//!
//! The machine itself only ever sees the final integer; these multipliers
//! compose multiplicatively upstream of it.

/// Multiplier applied once per hint used.
pub const HINT_MULTIPLIER: f64 = 0.9;
/// Multiplier when the solution was revealed.
pub const REVEAL_MULTIPLIER: f64 = 0.25;
/// Multiplier when the final answer was incorrect.
pub const INCORRECT_MULTIPLIER: f64 = 0.5;

/// Shape `base_xp` by the attempt's circumstances.
pub fn shape_xp(base_xp: u64, hints_used: u32, revealed_solution: bool, was_incorrect: bool) -> u64 {
    let mut xp = base_xp as f64;
    xp *= HINT_MULTIPLIER.powi(hints_used.min(i32::MAX as u32) as i32);
    if revealed_solution {
        xp *= REVEAL_MULTIPLIER;
    }
    if was_incorrect {
        xp *= INCORRECT_MULTIPLIER;
    }
    xp.round() as u64
}
