//! Progression state machine — XP, levels, streaks, and badges.
//!
//! ## Module overview
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `levels`  | Threshold table and XP → level/title derivation |
//! | `stats`   | `ProgressionStats` and the pure per-result transition |
//! | `rewards` | Multiplicative XP shaping applied upstream of the machine |
//! | `badges`  | Tagged badge requirements, evaluators, permanent earned set |

pub mod badges;
pub mod levels;
pub mod rewards;
pub mod stats;

pub use badges::{
    evaluate as evaluate_badges, find as find_badge, progress as badge_progress, Badge,
    BadgeProgress, BadgeRequirement, EarnedBadges, BADGES,
};
pub use levels::{level_for_xp, LevelThreshold, LEVEL_THRESHOLDS};
pub use rewards::shape_xp;
pub use stats::{ExerciseResult, ProgressionStats};
