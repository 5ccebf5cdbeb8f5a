//! Object and logic templates built on the synthesized profile record.

use crate::exercise_engine::{
    catalog::ExerciseTemplate,
    helpers::answer_set,
    models::{AnswerSet, Category, Difficulty, ExerciseKind},
    variables::{GeneratedVariables, VariableConstraints},
};

pub fn templates() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate {
            key: "profile-field",
            kind: ExerciseKind::Quiz,
            category: Category::Objects,
            difficulty: Difficulty::Junior,
            title: "Profile Field Access",
            prompt: "Given profile = {context}, what is the value of profile.score?",
            constraints: VariableConstraints::default(),
            build_answers: field_answers,
            ground_truth: field_truth,
        },
        ExerciseTemplate {
            key: "boolean-guard",
            kind: ExerciseKind::Challenge,
            category: Category::Logic,
            difficulty: Difficulty::Senior,
            title: "Boolean Guard",
            prompt: "Given profile = {context}, what does \
                     profile.active && profile.score > {number} evaluate to?",
            constraints: VariableConstraints {
                number_range: (0, 100),
                ..VariableConstraints::default()
            },
            build_answers: guard_answers,
            ground_truth: guard_truth,
        },
    ]
}

// ---------------------------------------------------------------------------
// profile-field
// ---------------------------------------------------------------------------

fn field_truth(vars: &GeneratedVariables) -> String {
    vars.context.score.to_string()
}

fn field_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    answer_set(
        field_truth(vars),
        vec![
            // Neighbouring field read instead.
            vars.context.age.to_string(),
            (vars.context.score + 1).to_string(),
            vars.context.name.clone(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// boolean-guard
// ---------------------------------------------------------------------------

fn guard_value(vars: &GeneratedVariables) -> bool {
    vars.context.active && vars.context.score > vars.number
}

fn guard_truth(vars: &GeneratedVariables) -> String {
    guard_value(vars).to_string()
}

fn guard_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let value = guard_value(vars);
    answer_set(value.to_string(), vec![(!value).to_string()], shuffle_seed)
}
