//! Numeric templates: modulo, precedence, integer division.

use crate::exercise_engine::{
    catalog::ExerciseTemplate,
    helpers::answer_set,
    models::{AnswerSet, Category, Difficulty, ExerciseKind},
    variables::{GeneratedVariables, VariableConstraints},
};

pub fn templates() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate {
            key: "modulo",
            kind: ExerciseKind::Quiz,
            category: Category::Numbers,
            difficulty: Difficulty::Junior,
            title: "Modulo",
            prompt: "What is the value of {number} % {number2}?",
            // Lower bound 2 keeps the divisor non-zero.
            constraints: VariableConstraints {
                number_range: (2, 30),
                ..VariableConstraints::default()
            },
            build_answers: modulo_answers,
            ground_truth: modulo_truth,
        },
        ExerciseTemplate {
            key: "sum-then-double",
            kind: ExerciseKind::Review,
            category: Category::Numbers,
            difficulty: Difficulty::Junior,
            title: "Sum Then Double",
            prompt: "What does ({number} + {number2}) * 2 evaluate to?",
            constraints: VariableConstraints::default(),
            build_answers: sum_then_double_answers,
            ground_truth: sum_then_double_truth,
        },
        ExerciseTemplate {
            key: "integer-division",
            kind: ExerciseKind::Challenge,
            category: Category::Numbers,
            difficulty: Difficulty::Mid,
            title: "Integer Division",
            prompt: "Integer division truncates the remainder. What is \
                     {number} / {number2} using integer division?",
            constraints: VariableConstraints {
                number_range: (2, 40),
                ..VariableConstraints::default()
            },
            build_answers: integer_division_answers,
            ground_truth: integer_division_truth,
        },
    ]
}

// ---------------------------------------------------------------------------
// modulo
// ---------------------------------------------------------------------------

fn modulo_truth(vars: &GeneratedVariables) -> String {
    (vars.number % vars.number2).to_string()
}

fn modulo_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let (a, b) = (vars.number, vars.number2);
    answer_set(
        (a % b).to_string(),
        vec![
            // Wrong operator.
            (a / b).to_string(),
            // Operands reversed.
            (b % a).to_string(),
            (a % b + 1).to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// sum-then-double
// ---------------------------------------------------------------------------

fn sum_then_double_truth(vars: &GeneratedVariables) -> String {
    ((vars.number + vars.number2) * 2).to_string()
}

fn sum_then_double_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let (a, b) = (vars.number, vars.number2);
    answer_set(
        ((a + b) * 2).to_string(),
        vec![
            // Precedence slip: only the second operand doubled.
            (a + b * 2).to_string(),
            // Doubling forgotten.
            (a + b).to_string(),
            ((a + b) * 2 - 1).to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// integer-division
// ---------------------------------------------------------------------------

fn integer_division_truth(vars: &GeneratedVariables) -> String {
    (vars.number / vars.number2).to_string()
}

fn integer_division_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let (a, b) = (vars.number, vars.number2);
    answer_set(
        (a / b).to_string(),
        vec![
            // Rounded up instead of truncated.
            ((a + b - 1) / b).to_string(),
            // Wrong operator.
            (a % b).to_string(),
            (a / b + 1).to_string(),
        ],
        shuffle_seed,
    )
}
