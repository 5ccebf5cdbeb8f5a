//! Daily selection engine: a personalized, reproducible "exercise of the
//! day" drawn from a fixed content pool.
//!
//! Selection is a pure function of (date, identity, pool, completion
//! state); persistence of the frozen per-date record lives in
//! [`ProgressStore`](crate::store::ProgressStore). The current date is
//! always supplied by the caller — the engine never reads a clock.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exercise_engine::models::{Category, Difficulty};

/// Identity token used when no user id is available; anonymous users on
/// the same date share a pick.
pub const ANONYMOUS_TOKEN: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyError {
    #[error("daily exercise pool is empty")]
    EmptyPool,
}

/// One entry of the host-provided static pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolExercise {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
}

/// The frozen record of one date's challenge. At most one exists per date;
/// once created its `exercise_id` is never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallengeRecord {
    pub date: NaiveDate,
    pub exercise_id: String,
    pub completed: bool,
    /// Caller-supplied epoch milliseconds of the completing attempt.
    pub completed_at: Option<u64>,
    pub score: Option<u8>,
}

/// Stable string hash (the classic multiply-by-31 fold). Deliberately not
/// `DefaultHasher`: the pick must reproduce across sessions, platforms,
/// and compiler versions.
pub fn stable_hash(input: &str) -> u64 {
    let mut h: u64 = 0;
    for byte in input.bytes() {
        h = h.wrapping_mul(31).wrapping_add(u64::from(byte));
    }
    h
}

/// Derive the day's pick for a user.
///
/// Narrowing steps, each skipped rather than applied when it would empty
/// the candidate set (completed-everything users keep training; a level
/// with no matching content falls back to the whole pool):
/// 1. drop already-completed exercises,
/// 2. keep difficulty ranks within `[user_rank - 1, user_rank]`,
/// 3. `index = hash(date ++ identity) mod candidates`.
pub fn select_daily(
    pool: &[PoolExercise],
    date: NaiveDate,
    user_id: Option<&str>,
    user_level: Option<Difficulty>,
    completed: &HashSet<String>,
) -> Result<String, DailyError> {
    if pool.is_empty() {
        return Err(DailyError::EmptyPool);
    }
    let identity = user_id.unwrap_or(ANONYMOUS_TOKEN);
    let seed = stable_hash(&format!("{}{}", date.format("%Y-%m-%d"), identity));

    let mut candidates: Vec<&PoolExercise> = pool.iter().collect();

    if !completed.is_empty() {
        let remaining: Vec<&PoolExercise> = candidates
            .iter()
            .copied()
            .filter(|e| !completed.contains(&e.id))
            .collect();
        if !remaining.is_empty() {
            candidates = remaining;
        }
    }

    if let Some(level) = user_level {
        let rank = i32::from(level.rank());
        let windowed: Vec<&PoolExercise> = candidates
            .iter()
            .copied()
            .filter(|e| {
                let r = i32::from(e.difficulty.rank());
                r >= rank - 1 && r <= rank
            })
            .collect();
        if !windowed.is_empty() {
            candidates = windowed;
        }
    }

    let index = (seed % candidates.len() as u64) as usize;
    Ok(candidates[index].id.clone())
}

/// Consecutive-day streak over completed daily records.
///
/// The most recent completed date must be `today` or yesterday, otherwise
/// the streak is 0; from there, count backwards while each step is exactly
/// one day.
pub fn daily_streak<'a, I>(records: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a DailyChallengeRecord>,
{
    let mut dates: Vec<NaiveDate> = records
        .into_iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let Some(&most_recent) = dates.first() else {
        return 0;
    };
    if most_recent != today && Some(most_recent) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1u32;
    let mut cursor = most_recent;
    for &date in &dates[1..] {
        if cursor.pred_opt() == Some(date) {
            streak += 1;
            cursor = date;
        } else {
            break;
        }
    }
    streak
}
