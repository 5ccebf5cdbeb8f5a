//! The persisted progress blob and the operations the host calls.
//!
//! The host owns where the blob lives (file, localStorage bridge, sync
//! layer); this module only defines its shape and the single-writer
//! read→compute→write transitions over it. A corrupt blob loads as a
//! fresh empty store — a partial record is never applied.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::daily::{self, DailyChallengeRecord, DailyError, PoolExercise};
use crate::exercise_engine::models::Difficulty;
use crate::progression::{
    badges::{self, Badge, BadgeProgress, EarnedBadges},
    stats::{ExerciseResult, ProgressionStats},
};

/// The latest completion of one exercise. Repeat completions replace the
/// record (bumping `attempts`); they are never appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedExerciseRecord {
    pub exercise_id: String,
    /// Caller-supplied epoch milliseconds.
    pub completed_at: u64,
    /// 0-100.
    pub score: u8,
    pub time_spent_seconds: u32,
    /// At least 1.
    pub attempts: u32,
}

/// Per-day aggregates, additive within the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub xp_earned: u64,
    pub exercises_completed: u64,
}

/// Outcome of recording a result: the updated stats plus any badges that
/// crossed their threshold on this event.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultOutcome {
    pub stats: ProgressionStats,
    pub newly_earned: Vec<&'static Badge>,
}

/// What the host shows for "today's challenge".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayChallenge {
    pub exercise_id: String,
    pub completed: bool,
    pub score: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressStore {
    pub completed: BTreeMap<String, CompletedExerciseRecord>,
    pub daily_challenges: BTreeMap<NaiveDate, DailyChallengeRecord>,
    pub stats: ProgressionStats,
    pub earned_badges: EarnedBadges,
    pub daily_progress: BTreeMap<NaiveDate, DailyProgress>,
}

impl ProgressStore {
    /// Deserialize a persisted blob. Anything unreadable yields a fresh
    /// empty store.
    pub fn from_json(raw: &str) -> ProgressStore {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Absorb one exercise result: replace the completion record, run the
    /// stats transition, bump the day's aggregates, and grant any newly
    /// qualified badges.
    pub fn record_exercise_result(
        &mut self,
        result: ExerciseResult,
        completed_at_millis: u64,
    ) -> ResultOutcome {
        match self.completed.get_mut(&result.exercise_id) {
            Some(record) => {
                record.attempts += 1;
                record.completed_at = completed_at_millis;
                record.score = result.score;
                record.time_spent_seconds = result.time_spent_seconds;
            }
            None => {
                self.completed.insert(
                    result.exercise_id.clone(),
                    CompletedExerciseRecord {
                        exercise_id: result.exercise_id.clone(),
                        completed_at: completed_at_millis,
                        score: result.score,
                        time_spent_seconds: result.time_spent_seconds,
                        attempts: 1,
                    },
                );
            }
        }

        self.stats = self.stats.apply(&result);

        let progress = self
            .daily_progress
            .entry(result.day)
            .or_insert(DailyProgress { date: result.day, xp_earned: 0, exercises_completed: 0 });
        progress.xp_earned += result.xp_earned;
        progress.exercises_completed += 1;

        let newly_earned = badges::evaluate(&self.stats, &mut self.earned_badges);
        ResultOutcome { stats: self.stats.clone(), newly_earned }
    }

    /// The challenge for `date`, deriving and freezing it on first query.
    ///
    /// Once a record exists its exercise id is returned as stored — pool
    /// changes or new completions within the day never move the pick.
    pub fn today_challenge(
        &mut self,
        pool: &[PoolExercise],
        date: NaiveDate,
        user_id: Option<&str>,
        user_level: Option<Difficulty>,
    ) -> Result<TodayChallenge, DailyError> {
        if let Some(record) = self.daily_challenges.get(&date) {
            return Ok(TodayChallenge {
                exercise_id: record.exercise_id.clone(),
                completed: record.completed,
                score: record.score,
            });
        }

        let completed_ids: HashSet<String> = self.completed.keys().cloned().collect();
        let exercise_id = daily::select_daily(pool, date, user_id, user_level, &completed_ids)?;
        self.daily_challenges.insert(
            date,
            DailyChallengeRecord {
                date,
                exercise_id: exercise_id.clone(),
                completed: false,
                completed_at: None,
                score: None,
            },
        );
        Ok(TodayChallenge { exercise_id, completed: false, score: None })
    }

    /// Mark the frozen challenge for `date` completed. Returns false when
    /// no record exists for that date (nothing was queried that day).
    pub fn record_daily_completion(
        &mut self,
        date: NaiveDate,
        score: u8,
        completed_at_millis: u64,
    ) -> bool {
        match self.daily_challenges.get_mut(&date) {
            Some(record) => {
                record.completed = true;
                record.completed_at = Some(completed_at_millis);
                record.score = Some(score);
                true
            }
            None => false,
        }
    }

    /// Progress toward a badge, or `None` for an unknown id.
    pub fn badge_progress(&self, badge_id: &str) -> Option<BadgeProgress> {
        badges::find(badge_id).map(|badge| badges::progress(&badge.requirement, &self.stats))
    }

    /// Consecutive completed-daily-challenge days ending today/yesterday.
    pub fn daily_streak(&self, today: NaiveDate) -> u32 {
        daily::daily_streak(self.daily_challenges.values(), today)
    }
}
