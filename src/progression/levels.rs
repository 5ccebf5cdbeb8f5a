//! The level threshold table and XP → level derivation.
//!
//! Level and title are always re-derived from total XP — they are never
//! stored, so they can never drift from the XP that earned them.

use serde::{Deserialize, Serialize};

/// One row of the threshold table. Rows are ordered by strictly
/// increasing `min_xp` and `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub min_xp: u64,
    pub level: u32,
    pub title: &'static str,
}

const fn row(min_xp: u64, level: u32, title: &'static str) -> LevelThreshold {
    LevelThreshold { min_xp, level, title }
}

pub static LEVEL_THRESHOLDS: [LevelThreshold; 15] = [
    row(0, 1, "Novice"),
    row(100, 2, "Apprentice"),
    row(250, 3, "Student"),
    row(400, 4, "Tinkerer"),
    row(550, 5, "Coder"),
    row(700, 6, "Problem Solver"),
    row(900, 7, "Developer"),
    row(1150, 8, "Engineer"),
    row(1400, 9, "Architect"),
    row(1700, 10, "Expert"),
    row(2000, 11, "Master"),
    row(2400, 12, "Guru"),
    row(2900, 13, "Virtuoso"),
    row(3500, 14, "Legend"),
    row(4200, 15, "Grandmaster"),
];

/// Greatest row whose `min_xp` does not exceed `xp`. XP below the lowest
/// threshold clamps to the first row rather than failing.
pub fn level_for_xp(xp: u64) -> &'static LevelThreshold {
    let mut current = &LEVEL_THRESHOLDS[0];
    for threshold in &LEVEL_THRESHOLDS {
        if threshold.min_xp <= xp {
            current = threshold;
        } else {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing() {
        for pair in LEVEL_THRESHOLDS.windows(2) {
            assert!(pair[0].min_xp < pair[1].min_xp);
            assert_eq!(pair[0].level + 1, pair[1].level);
        }
    }

    #[test]
    fn xp_ladder_matches_expected_levels() {
        assert_eq!(level_for_xp(0).level, 1);
        assert_eq!(level_for_xp(120).level, 2);
        assert_eq!(level_for_xp(720).level, 6);
        assert_eq!(level_for_xp(2050).level, 11);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(level_for_xp(99).level, 1);
        assert_eq!(level_for_xp(100).level, 2);
        assert_eq!(level_for_xp(4200).level, 15);
        assert_eq!(level_for_xp(1_000_000).level, 15);
    }

    #[test]
    fn level_is_monotonic_in_xp() {
        let mut previous = 0;
        for xp in (0..5000).step_by(37) {
            let level = level_for_xp(xp).level;
            assert!(level >= previous, "level regressed at xp {xp}");
            previous = level;
        }
    }
}
