//! Built-in exercise templates, grouped by category.
//!
//! Every template is a declarative [`ExerciseTemplate`] value: prompt text
//! with placeholders, sampling constraints, and a single answer builder
//! that yields options and correct index together.

use crate::exercise_engine::catalog::ExerciseTemplate;

pub mod arrays;
pub mod numbers;
pub mod objects;
pub mod strings;

/// Every registered template, in registration order. Ordering is cosmetic:
/// lookups go through stable keys, never positions.
pub fn all() -> Vec<ExerciseTemplate> {
    let mut templates = Vec::new();
    templates.extend(arrays::templates());
    templates.extend(numbers::templates());
    templates.extend(strings::templates());
    templates.extend(objects::templates());
    templates
}
