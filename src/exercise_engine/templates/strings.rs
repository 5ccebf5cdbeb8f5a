//! String templates: length, concatenation, repetition.

use crate::exercise_engine::{
    catalog::ExerciseTemplate,
    helpers::answer_set,
    models::{AnswerSet, Category, Difficulty, ExerciseKind},
    variables::{GeneratedVariables, VariableConstraints},
};

pub fn templates() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate {
            key: "string-length",
            kind: ExerciseKind::Quiz,
            category: Category::Strings,
            difficulty: Difficulty::Junior,
            title: "String Length",
            prompt: "What is the length of the string \"{string}\"?",
            constraints: VariableConstraints::default(),
            build_answers: length_answers,
            ground_truth: length_truth,
        },
        ExerciseTemplate {
            key: "join-names",
            kind: ExerciseKind::Review,
            category: Category::Strings,
            difficulty: Difficulty::Junior,
            title: "Join Names",
            prompt: "Two variables hold \"{name}\" and \"{name2}\". They are joined \
                     with a single space, first variable first. What is the result?",
            constraints: VariableConstraints::default(),
            build_answers: join_answers,
            ground_truth: join_truth,
        },
        ExerciseTemplate {
            key: "repeat-word",
            kind: ExerciseKind::Challenge,
            category: Category::Strings,
            difficulty: Difficulty::Mid,
            title: "Repeat Word",
            prompt: "The string \"{string}\" is repeated {number2} times with \
                     nothing between the copies. What is produced?",
            // Small repeat counts keep the options readable.
            constraints: VariableConstraints {
                number_range: (2, 4),
                ..VariableConstraints::default()
            },
            build_answers: repeat_answers,
            ground_truth: repeat_truth,
        },
    ]
}

// ---------------------------------------------------------------------------
// string-length
// ---------------------------------------------------------------------------

fn length_truth(vars: &GeneratedVariables) -> String {
    vars.string.len().to_string()
}

fn length_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let len = vars.string.len();
    answer_set(
        len.to_string(),
        vec![
            // Last index mistaken for the length.
            len.saturating_sub(1).to_string(),
            (len + 1).to_string(),
            // Wrong variable measured.
            vars.string2.len().to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// join-names
// ---------------------------------------------------------------------------

fn join_truth(vars: &GeneratedVariables) -> String {
    format!("{} {}", vars.name, vars.name2)
}

fn join_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    answer_set(
        join_truth(vars),
        vec![
            // Operands reversed.
            format!("{} {}", vars.name2, vars.name),
            // Separator forgotten.
            format!("{}{}", vars.name, vars.name2),
            vars.name.clone(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// repeat-word
// ---------------------------------------------------------------------------

fn repeat_count(vars: &GeneratedVariables) -> usize {
    // number2 is constrained to 2..=4; hand-built vars may sit outside that.
    vars.number2.clamp(1, 6) as usize
}

fn repeat_truth(vars: &GeneratedVariables) -> String {
    vars.string.repeat(repeat_count(vars))
}

fn repeat_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let count = repeat_count(vars);
    answer_set(
        vars.string.repeat(count),
        vec![
            // Off-by-one loop bounds in both directions.
            vars.string.repeat(count - 1),
            vars.string.repeat(count + 1),
            // Wrong second operand.
            format!("{}{}", vars.string, vars.string2),
        ],
        shuffle_seed,
    )
}
