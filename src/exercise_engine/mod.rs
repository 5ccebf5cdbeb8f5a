//! Core exercise engine — seeded sampling, variable pools, templates, and
//! exercise generation.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `sampler`   | Pure seeded sampling: unit, range, pick, Fisher-Yates shuffle |
//! | `variables` | Domain pools and the per-seed `GeneratedVariables` bundle |
//! | `models`    | Shared types: facets, requests, `GeneratedExercise` |
//! | `helpers`   | Prompt rendering and the atomic option-set builder |
//! | `catalog`   | Template arena with stable keys and authoring validation |
//! | `templates` | Built-in templates grouped by category |
//! | `generator` | `generate_exercise` / `generate_batch` / calendar-day generation |

pub mod catalog;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod sampler;
pub mod templates;
pub mod variables;

// Re-export the public API surface so callers can use
// `exercise_engine::generate_exercise` without reaching into sub-modules.
pub use catalog::{ExerciseTemplate, TemplateCatalog, TemplateError, TemplateId};
pub use generator::{
    generate_batch, generate_exercise, generate_for_calendar_day, generate_from_template,
    GenerateError,
};
pub use models::{
    AnswerSet, BatchRequest, Category, Difficulty, ExerciseKind, ExerciseRequest,
    GeneratedExercise, TemplateSelector,
};
pub use variables::{generate_variables, ContextObject, GeneratedVariables, VariableConstraints};
