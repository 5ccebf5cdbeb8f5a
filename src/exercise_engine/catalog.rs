//! The template catalog: an arena of declarative exercise rules addressed
//! by stable string keys.
//!
//! Templates are never referenced by array position — reordering the
//! registration list cannot break a stored `template_key`.

use std::collections::HashMap;

use thiserror::Error;

use crate::exercise_engine::{
    helpers,
    models::{AnswerSet, Category, Difficulty, ExerciseKind},
    templates,
    variables::{generate_variables, GeneratedVariables, VariableConstraints},
};

/// Authoring defects, caught by [`TemplateCatalog::validate`] in tests —
/// never surfaced to users at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unresolved placeholder `{{{token}}}` in template `{key}`")]
    UnresolvedPlaceholder { key: String, token: String },
    #[error("template `{key}` produced fewer than two distinct options")]
    TooFewOptions { key: String },
    #[error("template `{key}` produced duplicate options")]
    DuplicateOptions { key: String },
    #[error("template `{key}` correct index {index} out of range ({len} options)")]
    CorrectIndexOutOfRange { key: String, index: usize, len: usize },
    #[error("template `{key}` ground truth `{expected}` is not the indexed option")]
    GroundTruthMismatch { key: String, expected: String },
}

/// Opaque handle into the catalog arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(usize);

/// A declarative exercise rule.
///
/// `build_answers` returns options and correct index as one value — there
/// is deliberately no separate correct-answer entry point to keep in
/// lockstep with it. `ground_truth` re-states the correct answer from the
/// rule's stated semantics and exists so validation and tests can check
/// answer integrity independently.
#[derive(Debug, Clone)]
pub struct ExerciseTemplate {
    pub key: &'static str,
    pub kind: ExerciseKind,
    pub category: Category,
    pub difficulty: Difficulty,
    pub title: &'static str,
    /// Prompt text with `{placeholder}` tokens.
    pub prompt: &'static str,
    /// Sampling bounds this template needs.
    pub constraints: VariableConstraints,
    pub build_answers: fn(&GeneratedVariables, u64) -> AnswerSet,
    pub ground_truth: fn(&GeneratedVariables) -> String,
}

pub struct TemplateCatalog {
    templates: Vec<ExerciseTemplate>,
    by_key: HashMap<&'static str, TemplateId>,
}

impl TemplateCatalog {
    /// The built-in catalog with every registered template.
    pub fn standard() -> Self {
        Self::from_templates(templates::all())
    }

    /// Build a catalog from an explicit template list. Later registrations
    /// with a duplicate key are ignored (first one wins).
    pub fn from_templates(list: Vec<ExerciseTemplate>) -> Self {
        let mut templates = Vec::with_capacity(list.len());
        let mut by_key = HashMap::with_capacity(list.len());
        for template in list {
            if by_key.contains_key(template.key) {
                continue;
            }
            by_key.insert(template.key, TemplateId(templates.len()));
            templates.push(template);
        }
        TemplateCatalog { templates, by_key }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[ExerciseTemplate] {
        &self.templates
    }

    pub fn get(&self, id: TemplateId) -> Option<&ExerciseTemplate> {
        self.templates.get(id.0)
    }

    pub fn by_key(&self, key: &str) -> Option<&ExerciseTemplate> {
        self.by_key.get(key).and_then(|id| self.get(*id))
    }

    /// Templates matching the given facets; `None` facets match everything.
    pub fn filtered(
        &self,
        difficulty: Option<Difficulty>,
        category: Option<Category>,
    ) -> Vec<&ExerciseTemplate> {
        self.templates
            .iter()
            .filter(|t| difficulty.map_or(true, |d| t.difficulty == d))
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// Render and build every template against a spread of probe seeds,
    /// checking the authoring invariants: prompts fully resolve, option
    /// lists are pairwise distinct with at least two entries, and the
    /// correct index points at the ground-truth answer.
    pub fn validate(&self) -> Result<(), TemplateError> {
        const PROBE_SEEDS: [u64; 6] = [0, 1, 42, 7, 999, 0xDEAD_BEEF];
        for template in &self.templates {
            for seed in PROBE_SEEDS {
                let vars = generate_variables(&template.constraints, seed);
                helpers::render_prompt(template.key, template.prompt, &vars)?;
                let set = (template.build_answers)(&vars, seed);
                check_answer_set(template, &vars, &set)?;
            }
        }
        Ok(())
    }
}

fn check_answer_set(
    template: &ExerciseTemplate,
    vars: &GeneratedVariables,
    set: &AnswerSet,
) -> Result<(), TemplateError> {
    let key = || template.key.to_string();
    if set.options.len() < 2 {
        return Err(TemplateError::TooFewOptions { key: key() });
    }
    let mut sorted = set.options.clone();
    sorted.sort();
    sorted.dedup();
    if sorted.len() != set.options.len() {
        return Err(TemplateError::DuplicateOptions { key: key() });
    }
    if set.correct_index >= set.options.len() {
        return Err(TemplateError::CorrectIndexOutOfRange {
            key: key(),
            index: set.correct_index,
            len: set.options.len(),
        });
    }
    let expected = (template.ground_truth)(vars);
    if set.options[set.correct_index] != expected {
        return Err(TemplateError::GroundTruthMismatch { key: key(), expected });
    }
    Ok(())
}
