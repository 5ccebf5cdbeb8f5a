//! # code_drill_gen
//!
//! A fully offline, deterministic core for a learn-to-code training app.
//!
//! Three coupled pieces live here, sharing one requirement —
//! reproducibility: identical inputs always yield identical outputs,
//! across sessions, with no server-side schedule.
//!
//! 1. **Exercise engine**: seeded templates that procedurally generate
//!    quiz/challenge/review exercises, each with a multiple-choice option
//!    set containing exactly one provably correct answer among
//!    plausible-mistake distractors.
//! 2. **Daily selection**: a personalized, reproducible "exercise of the
//!    day" picked from a fixed content pool by hashing (date, identity),
//!    frozen per date once queried.
//! 3. **Progression**: a pure state machine over XP, levels, streaks, and
//!    badges, driven by exercise-result events.
//!
//! ## How it works
//!
//! 1. Build a [`TemplateCatalog`] (the built-in one via
//!    [`TemplateCatalog::standard`]).
//! 2. Call [`generate_exercise`] with an [`ExerciseRequest`] — the engine
//!    samples variables from the seed, computes the correct answer and its
//!    distractors atomically, shuffles reproducibly, and resolves the
//!    prompt placeholders.
//! 3. Report completions through [`ProgressStore::record_exercise_result`];
//!    the store replaces completion records, runs the stats transition,
//!    and grants newly qualified badges.
//!
//! Clock readings, identity, and seeds are always passed in — the crate
//! never reads ambient state, so every function is a pure function of its
//! explicit arguments.
//!
//! ## Quick start
//!
//! ```rust
//! use code_drill_gen::{
//!     generate_exercise, ExerciseRequest, TemplateCatalog, TemplateSelector,
//! };
//!
//! let catalog = TemplateCatalog::standard();
//!
//! // Seeded for reproducibility; `seed: None` draws fresh entropy.
//! let request = ExerciseRequest::seeded(TemplateSelector::Random, 42, 1_700_000_000_000);
//! let exercise = generate_exercise(&catalog, request).unwrap();
//!
//! println!("Q: {}", exercise.prompt);
//! for (i, option) in exercise.options.iter().enumerate() {
//!     let mark = if i == exercise.correct_index { "+" } else { " " };
//!     println!("[{mark}] {option}");
//! }
//! ```

pub mod daily;
pub mod exercise_engine;
pub mod progression;
pub mod store;

// Convenience re-exports so callers can use `code_drill_gen::generate_exercise`
// directly without reaching into sub-modules.
pub use daily::{
    daily_streak, select_daily, DailyChallengeRecord, DailyError, PoolExercise, ANONYMOUS_TOKEN,
};
pub use exercise_engine::{
    generate_batch, generate_exercise, generate_for_calendar_day, generate_from_template,
    generate_variables, AnswerSet, BatchRequest, Category, ContextObject, Difficulty,
    ExerciseKind, ExerciseRequest, ExerciseTemplate, GenerateError, GeneratedExercise,
    GeneratedVariables, TemplateCatalog, TemplateError, TemplateSelector, VariableConstraints,
};
pub use progression::{
    evaluate_badges, find_badge, level_for_xp, shape_xp, Badge, BadgeProgress, BadgeRequirement,
    EarnedBadges, ExerciseResult, LevelThreshold, ProgressionStats, BADGES, LEVEL_THRESHOLDS,
};
pub use store::{
    CompletedExerciseRecord, DailyProgress, ProgressStore, ResultOutcome, TodayChallenge,
};

#[cfg(test)]
mod tests;
