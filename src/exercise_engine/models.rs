use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exercise_engine::variables::GeneratedVariables;

// ---------------------------------------------------------------------------
// Exercise facets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    Quiz,
    Challenge,
    Review,
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseKind::Quiz => write!(f, "Quiz"),
            ExerciseKind::Challenge => write!(f, "Challenge"),
            ExerciseKind::Review => write!(f, "Review"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Arrays,
    Strings,
    Numbers,
    Objects,
    Logic,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Arrays => "Arrays",
            Category::Strings => "Strings",
            Category::Numbers => "Numbers",
            Category::Objects => "Objects",
            Category::Logic => "Logic",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Junior,
    Mid,
    Senior,
}

impl Difficulty {
    /// Numeric rank used for the daily-selection level window.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Junior => 0,
            Difficulty::Mid => 1,
            Difficulty::Senior => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Junior => write!(f, "Junior"),
            Difficulty::Mid => write!(f, "Mid"),
            Difficulty::Senior => write!(f, "Senior"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// How to choose a template from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSelector {
    /// A specific template by its stable key.
    Key(String),
    /// A seed-derived pick across the whole catalog.
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRequest {
    pub selector: TemplateSelector,
    /// `None` draws a fresh entropy seed; pass `Some` to reproduce content.
    pub seed: Option<u64>,
    /// Caller-supplied clock reading, folded into the exercise id so that
    /// identical seeds still mint distinct ids across sessions.
    pub now_millis: u64,
}

impl ExerciseRequest {
    pub fn new(selector: TemplateSelector, now_millis: u64) -> Self {
        ExerciseRequest { selector, seed: None, now_millis }
    }

    pub fn seeded(selector: TemplateSelector, seed: u64, now_millis: u64) -> Self {
        ExerciseRequest { selector, seed: Some(seed), now_millis }
    }
}

/// Facet filters and seeding for [`generate_batch`](crate::generate_batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub count: usize,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    /// Template keys that must not appear in the batch.
    pub exclude_keys: Vec<String>,
    pub seed: u64,
    pub now_millis: u64,
}

/// Options plus the index of the correct one, produced atomically by a
/// template's answer builder. The two can never drift apart because no
/// separate correct-answer call exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// A fully resolved exercise, immutable once produced.
///
/// `seed` fully determines the content (prompt, options, correct index);
/// `id` additionally folds in the caller's clock so repeat generations of
/// the same content are still distinguishable records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExercise {
    pub id: String,
    pub template_key: String,
    pub kind: ExerciseKind,
    pub category: Category,
    pub difficulty: Difficulty,
    pub title: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub variables: GeneratedVariables,
    pub seed: u64,
}
