//! Badges: tagged requirements, one evaluator per tag, and the permanent
//! earned set.
//!
//! A badge is granted the first time its requirement evaluates true
//! against the current stats and is never revoked, even if the qualifying
//! metric later regresses (a broken streak does not take "Week Warrior"
//! away).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::exercise_engine::models::Category;
use crate::progression::stats::ProgressionStats;

/// Requirement variants, one evaluator arm per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeRequirement {
    /// Current daily streak reaches the threshold.
    Streak(u32),
    ExercisesCompleted(u64),
    XpEarned(u64),
    LevelReached(u32),
    /// Any completion at or under the time limit.
    Speed { max_seconds: u32 },
    /// Consecutive perfect scores (best-ever run counts).
    PerfectScores(u32),
    CategoryMastery { category: Category, count: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: BadgeRequirement,
}

const fn badge(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    requirement: BadgeRequirement,
) -> Badge {
    Badge { id, name, description, requirement }
}

pub static BADGES: [Badge; 13] = [
    badge("first-steps", "First Steps", "Complete your first exercise",
        BadgeRequirement::ExercisesCompleted(1)),
    badge("ten-down", "Ten Down", "Complete 10 exercises",
        BadgeRequirement::ExercisesCompleted(10)),
    badge("centurion", "Centurion", "Complete 100 exercises",
        BadgeRequirement::ExercisesCompleted(100)),
    badge("streak-3", "Committed", "Practice 3 days in a row",
        BadgeRequirement::Streak(3)),
    badge("streak-7", "Week Warrior", "Practice 7 days in a row",
        BadgeRequirement::Streak(7)),
    badge("streak-30", "Unstoppable", "Practice 30 days in a row",
        BadgeRequirement::Streak(30)),
    badge("xp-1000", "Rising Star", "Earn 1,000 XP",
        BadgeRequirement::XpEarned(1000)),
    badge("xp-5000", "XP Hoarder", "Earn 5,000 XP",
        BadgeRequirement::XpEarned(5000)),
    badge("level-5", "Halfway Up", "Reach level 5",
        BadgeRequirement::LevelReached(5)),
    badge("level-10", "High Climber", "Reach level 10",
        BadgeRequirement::LevelReached(10)),
    badge("quick-thinker", "Quick Thinker", "Solve an exercise in 30 seconds",
        BadgeRequirement::Speed { max_seconds: 30 }),
    badge("flawless-five", "Flawless Five", "Score 100 five times in a row",
        BadgeRequirement::PerfectScores(5)),
    badge("array-master", "Array Master", "Complete 20 array exercises",
        BadgeRequirement::CategoryMastery { category: Category::Arrays, count: 20 }),
];

/// Look up a badge by id.
pub fn find(badge_id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == badge_id)
}

/// Evaluate one requirement against the current stats.
pub fn requirement_met(requirement: &BadgeRequirement, stats: &ProgressionStats) -> bool {
    match requirement {
        BadgeRequirement::Streak(days) => stats.current_streak >= *days,
        BadgeRequirement::ExercisesCompleted(count) => stats.exercises_completed >= *count,
        BadgeRequirement::XpEarned(xp) => stats.total_xp >= *xp,
        BadgeRequirement::LevelReached(level) => stats.level() >= *level,
        BadgeRequirement::Speed { max_seconds } => stats
            .fastest_solve_seconds
            .map_or(false, |fastest| fastest <= *max_seconds),
        BadgeRequirement::PerfectScores(count) => stats.best_perfect_streak >= *count,
        BadgeRequirement::CategoryMastery { category, count } => stats
            .completed_by_category
            .get(category)
            .copied()
            .unwrap_or(0)
            >= *count,
    }
}

/// Progress toward a badge, for display.
///
/// For `Speed`, `current` is the fastest recorded solve in seconds (lower
/// is better; `u32::MAX` when nothing is recorded yet) and `target` the
/// limit. For every other tag, `current` counts up toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub current: u64,
    pub target: u64,
}

pub fn progress(requirement: &BadgeRequirement, stats: &ProgressionStats) -> BadgeProgress {
    match requirement {
        BadgeRequirement::Streak(days) => BadgeProgress {
            current: u64::from(stats.current_streak),
            target: u64::from(*days),
        },
        BadgeRequirement::ExercisesCompleted(count) => BadgeProgress {
            current: stats.exercises_completed,
            target: *count,
        },
        BadgeRequirement::XpEarned(xp) => BadgeProgress { current: stats.total_xp, target: *xp },
        BadgeRequirement::LevelReached(level) => BadgeProgress {
            current: u64::from(stats.level()),
            target: u64::from(*level),
        },
        BadgeRequirement::Speed { max_seconds } => BadgeProgress {
            current: u64::from(stats.fastest_solve_seconds.unwrap_or(u32::MAX)),
            target: u64::from(*max_seconds),
        },
        BadgeRequirement::PerfectScores(count) => BadgeProgress {
            current: u64::from(stats.best_perfect_streak),
            target: u64::from(*count),
        },
        BadgeRequirement::CategoryMastery { category, count } => BadgeProgress {
            current: stats.completed_by_category.get(category).copied().unwrap_or(0),
            target: *count,
        },
    }
}

/// The permanently earned set. Exposes no removal operation — membership
/// is forever once granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EarnedBadges(BTreeSet<String>);

impl EarnedBadges {
    pub fn contains(&self, badge_id: &str) -> bool {
        self.0.contains(badge_id)
    }

    pub fn insert(&mut self, badge_id: &str) {
        self.0.insert(badge_id.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Grant every unearned badge whose requirement now holds. Returns the
/// newly earned badges, in catalog order.
pub fn evaluate(stats: &ProgressionStats, earned: &mut EarnedBadges) -> Vec<&'static Badge> {
    let mut newly = Vec::new();
    for badge in &BADGES {
        if earned.contains(badge.id) {
            continue;
        }
        if requirement_met(&badge.requirement, stats) {
            earned.insert(badge.id);
            newly.push(badge);
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_ids_are_unique() {
        let mut ids: Vec<&str> = BADGES.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BADGES.len());
    }

    #[test]
    fn first_completion_earns_first_steps() {
        let stats = ProgressionStats { exercises_completed: 1, ..Default::default() };
        let mut earned = EarnedBadges::default();
        let newly = evaluate(&stats, &mut earned);
        assert!(newly.iter().any(|b| b.id == "first-steps"));
        assert!(earned.contains("first-steps"));
    }

    #[test]
    fn evaluation_is_idempotent_per_badge() {
        let stats = ProgressionStats { exercises_completed: 1, ..Default::default() };
        let mut earned = EarnedBadges::default();
        assert!(!evaluate(&stats, &mut earned).is_empty());
        assert!(evaluate(&stats, &mut earned).is_empty(), "badge granted twice");
    }

    #[test]
    fn earned_badges_survive_metric_regression() {
        let active = ProgressionStats { current_streak: 3, ..Default::default() };
        let mut earned = EarnedBadges::default();
        evaluate(&active, &mut earned);
        assert!(earned.contains("streak-3"));

        let lapsed = ProgressionStats { current_streak: 0, ..Default::default() };
        evaluate(&lapsed, &mut earned);
        assert!(earned.contains("streak-3"), "badge revoked on regression");
    }

    #[test]
    fn speed_progress_counts_down() {
        let stats = ProgressionStats { fastest_solve_seconds: Some(25), ..Default::default() };
        let p = progress(&BadgeRequirement::Speed { max_seconds: 30 }, &stats);
        assert_eq!(p, BadgeProgress { current: 25, target: 30 });
        assert!(requirement_met(&BadgeRequirement::Speed { max_seconds: 30 }, &stats));
    }

    #[test]
    fn category_mastery_checks_the_tagged_category() {
        let mut stats = ProgressionStats::default();
        stats.completed_by_category.insert(Category::Arrays, 20);
        let req = BadgeRequirement::CategoryMastery { category: Category::Arrays, count: 20 };
        assert!(requirement_met(&req, &stats));
        let other = BadgeRequirement::CategoryMastery { category: Category::Strings, count: 20 };
        assert!(!requirement_met(&other, &stats));
    }
}
