//! Progression stats and the pure transition applied per exercise result.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::exercise_engine::models::Category;
use crate::progression::levels::{level_for_xp, LevelThreshold};

/// One completed-exercise event, as reported by the host.
///
/// `category` is an explicit tag on the event; nothing is ever inferred
/// from the exercise id. An uncategorized result (`None`) still counts in
/// the aggregates — the content taxonomy is expected to grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub exercise_id: String,
    pub category: Option<Category>,
    /// 0-100.
    pub score: u8,
    pub xp_earned: u64,
    pub time_spent_seconds: u32,
    /// Calendar day of the attempt, supplied by the caller.
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStats {
    pub total_xp: u64,
    /// Consecutive active calendar days, counting today.
    pub current_streak: u32,
    /// Max-ever value of `current_streak`.
    pub longest_streak: u32,
    pub exercises_completed: u64,
    pub completed_by_category: BTreeMap<Category, u64>,
    /// Consecutive perfect (score 100) results.
    pub perfect_streak: u32,
    /// Max-ever value of `perfect_streak`.
    pub best_perfect_streak: u32,
    /// Shortest completion time seen so far.
    pub fastest_solve_seconds: Option<u32>,
    /// Most recent day with qualifying activity.
    pub last_active_day: Option<NaiveDate>,
}

impl Default for ProgressionStats {
    fn default() -> Self {
        ProgressionStats {
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            exercises_completed: 0,
            completed_by_category: BTreeMap::new(),
            perfect_streak: 0,
            best_perfect_streak: 0,
            fastest_solve_seconds: None,
            last_active_day: None,
        }
    }
}

impl ProgressionStats {
    /// Current level, re-derived from XP on every call.
    pub fn level(&self) -> u32 {
        self.threshold().level
    }

    /// Current title, re-derived from XP on every call.
    pub fn title(&self) -> &'static str {
        self.threshold().title
    }

    fn threshold(&self) -> &'static LevelThreshold {
        level_for_xp(self.total_xp)
    }

    /// Pure transition: the stats after absorbing `result`. `self` is
    /// untouched; hosts replace their stored stats with the return value.
    pub fn apply(&self, result: &ExerciseResult) -> ProgressionStats {
        let mut next = self.clone();

        next.total_xp = self.total_xp.saturating_add(result.xp_earned);
        next.exercises_completed += 1;
        if let Some(category) = result.category {
            *next.completed_by_category.entry(category).or_insert(0) += 1;
        }

        // Streak is per calendar day: only the first activity of a new day
        // moves it. A gap (or the first-ever activity) restarts at 1 —
        // never 0 on an active day.
        match self.last_active_day {
            Some(day) if day == result.day => {}
            Some(day) if result.day.pred_opt() == Some(day) => {
                next.current_streak = self.current_streak + 1;
            }
            _ => next.current_streak = 1,
        }
        next.longest_streak = next.longest_streak.max(next.current_streak);
        next.last_active_day = Some(result.day);

        if result.score >= 100 {
            next.perfect_streak = self.perfect_streak + 1;
            next.best_perfect_streak = next.best_perfect_streak.max(next.perfect_streak);
        } else {
            next.perfect_streak = 0;
        }

        next.fastest_solve_seconds = match self.fastest_solve_seconds {
            Some(best) => Some(best.min(result.time_spent_seconds)),
            None => Some(result.time_spent_seconds),
        };

        next
    }
}
