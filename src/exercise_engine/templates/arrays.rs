//! Array templates: filter/map chains, aggregation, indexing, slicing.
//!
//! Distractors follow the common-mistake patterns: wrong comparison
//! operator, off-by-one thresholds and indices, forgotten or reversed
//! chaining steps. Each builder lists its distractors most-plausible
//! first; `answer_set` dedups them against the correct answer before the
//! seeded shuffle.

use crate::exercise_engine::{
    catalog::ExerciseTemplate,
    helpers::{answer_set, format_array},
    models::{AnswerSet, Category, Difficulty, ExerciseKind},
    variables::{GeneratedVariables, VariableConstraints},
};

pub fn templates() -> Vec<ExerciseTemplate> {
    vec![
        ExerciseTemplate {
            key: "filter-then-double",
            kind: ExerciseKind::Quiz,
            category: Category::Arrays,
            difficulty: Difficulty::Junior,
            title: "Filter Then Double",
            prompt: "The array {array} is filtered to keep only values greater than \
                     {number2}, and each kept value is then doubled. What is the \
                     resulting array?",
            // Threshold below every element so the filter never empties the
            // kept list.
            constraints: VariableConstraints {
                number_range: (1, 2),
                array_len_range: (5, 8),
                array_value_range: (3, 9),
            },
            build_answers: filter_then_double_answers,
            ground_truth: filter_then_double_truth,
        },
        ExerciseTemplate {
            key: "array-sum",
            kind: ExerciseKind::Quiz,
            category: Category::Arrays,
            difficulty: Difficulty::Junior,
            title: "Array Sum",
            prompt: "{name} calls a function that adds up every value in {array}. \
                     What does it return?",
            constraints: VariableConstraints::default(),
            build_answers: sum_answers,
            ground_truth: sum_truth,
        },
        ExerciseTemplate {
            key: "largest-value",
            kind: ExerciseKind::Review,
            category: Category::Arrays,
            difficulty: Difficulty::Junior,
            title: "Largest Value",
            prompt: "What is the largest value in {array}?",
            constraints: VariableConstraints::default(),
            build_answers: max_answers,
            ground_truth: max_truth,
        },
        ExerciseTemplate {
            key: "reverse-then-first",
            kind: ExerciseKind::Challenge,
            category: Category::Arrays,
            difficulty: Difficulty::Mid,
            title: "Reverse Then Take First",
            prompt: "The array {array} is reversed and the first element of the \
                     result is taken. What is it?",
            // Two-digit values keep the length distractor unambiguous.
            constraints: VariableConstraints {
                number_range: (1, 20),
                array_len_range: (4, 7),
                array_value_range: (10, 99),
            },
            build_answers: reverse_first_answers,
            ground_truth: reverse_first_truth,
        },
        ExerciseTemplate {
            key: "count-above",
            kind: ExerciseKind::Challenge,
            category: Category::Arrays,
            difficulty: Difficulty::Mid,
            title: "Count Above Threshold",
            prompt: "How many values in {array} are strictly greater than {number2}?",
            constraints: VariableConstraints {
                number_range: (3, 9),
                array_len_range: (5, 8),
                array_value_range: (1, 12),
            },
            build_answers: count_above_answers,
            ground_truth: count_above_truth,
        },
        ExerciseTemplate {
            key: "middle-slice",
            kind: ExerciseKind::Review,
            category: Category::Arrays,
            difficulty: Difficulty::Senior,
            title: "Middle Slice",
            prompt: "A slice of {array} starts at index 1 and stops one element \
                     before the end. What array does it produce?",
            constraints: VariableConstraints {
                number_range: (1, 20),
                array_len_range: (4, 7),
                array_value_range: (10, 99),
            },
            build_answers: middle_slice_answers,
            ground_truth: middle_slice_truth,
        },
    ]
}

// ---------------------------------------------------------------------------
// filter-then-double
// ---------------------------------------------------------------------------

fn filter_kept(vars: &GeneratedVariables) -> Vec<i64> {
    vars.array.iter().copied().filter(|v| *v > vars.number2).collect()
}

fn filter_then_double_truth(vars: &GeneratedVariables) -> String {
    format_array(&filter_kept(vars).iter().map(|v| v * 2).collect::<Vec<_>>())
}

fn filter_then_double_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let threshold = vars.number2;
    let kept = filter_kept(vars);

    // Wrong operator: >= instead of >.
    let wrong_operator: Vec<i64> = vars
        .array
        .iter()
        .copied()
        .filter(|v| *v >= threshold)
        .map(|v| v * 2)
        .collect();
    // Off-by-one threshold.
    let off_by_one: Vec<i64> = vars
        .array
        .iter()
        .copied()
        .filter(|v| *v > threshold + 1)
        .map(|v| v * 2)
        .collect();
    // Forgotten map step.
    let undoubled = kept.clone();
    // Arithmetic slip while doubling.
    let doubled_plus_one: Vec<i64> = kept.iter().map(|v| v * 2 + 1).collect();
    // Reversed chaining: double first, filter the doubled values.
    let reversed: Vec<i64> = vars
        .array
        .iter()
        .map(|v| v * 2)
        .filter(|v| *v > threshold)
        .collect();

    answer_set(
        filter_then_double_truth(vars),
        vec![
            format_array(&wrong_operator),
            format_array(&off_by_one),
            format_array(&undoubled),
            format_array(&doubled_plus_one),
            format_array(&reversed),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// array-sum
// ---------------------------------------------------------------------------

fn sum_truth(vars: &GeneratedVariables) -> String {
    vars.array.iter().sum::<i64>().to_string()
}

fn sum_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let sum: i64 = vars.array.iter().sum();
    let last = vars.array.last().copied().unwrap_or(0);
    let first = vars.array.first().copied().unwrap_or(0);
    answer_set(
        sum.to_string(),
        vec![
            // Loop stops one element early.
            (sum - last).to_string(),
            // First element counted twice.
            (sum + first).to_string(),
            (sum + 1).to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// largest-value
// ---------------------------------------------------------------------------

fn max_truth(vars: &GeneratedVariables) -> String {
    vars.array.iter().max().copied().unwrap_or(0).to_string()
}

fn max_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let max = vars.array.iter().max().copied().unwrap_or(0);
    let min = vars.array.iter().min().copied().unwrap_or(0);
    let last = vars.array.last().copied().unwrap_or(0);
    answer_set(
        max.to_string(),
        vec![
            // Comparison flipped.
            min.to_string(),
            (max - 1).to_string(),
            // Scan forgotten, last element returned.
            last.to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// reverse-then-first
// ---------------------------------------------------------------------------

fn reverse_first_truth(vars: &GeneratedVariables) -> String {
    vars.array.last().copied().unwrap_or(0).to_string()
}

fn reverse_first_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let first = vars.array.first().copied().unwrap_or(0);
    let second_to_last = if vars.array.len() >= 2 {
        vars.array[vars.array.len() - 2]
    } else {
        first
    };
    answer_set(
        reverse_first_truth(vars),
        vec![
            // Reverse step forgotten.
            first.to_string(),
            second_to_last.to_string(),
            // Length confused with an element.
            vars.array.len().to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// count-above
// ---------------------------------------------------------------------------

fn count_above_truth(vars: &GeneratedVariables) -> String {
    vars.array
        .iter()
        .filter(|v| **v > vars.number2)
        .count()
        .to_string()
}

fn count_above_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let threshold = vars.number2;
    let count = vars.array.iter().filter(|v| **v > threshold).count();
    let at_least = vars.array.iter().filter(|v| **v >= threshold).count();
    let below = vars.array.len() - count;
    answer_set(
        count.to_string(),
        vec![
            // >= instead of >.
            at_least.to_string(),
            // Predicate reversed.
            below.to_string(),
            (count + 1).to_string(),
        ],
        shuffle_seed,
    )
}

// ---------------------------------------------------------------------------
// middle-slice
// ---------------------------------------------------------------------------

fn middle(vars: &GeneratedVariables) -> &[i64] {
    let len = vars.array.len();
    if len < 2 {
        return &vars.array;
    }
    &vars.array[1..len - 1]
}

fn middle_slice_truth(vars: &GeneratedVariables) -> String {
    format_array(middle(vars))
}

fn middle_slice_answers(vars: &GeneratedVariables, shuffle_seed: u64) -> AnswerSet {
    let len = vars.array.len();
    // End index misread as inclusive.
    let keep_last = &vars.array[1.min(len)..];
    // Start misread as index 0.
    let keep_first = &vars.array[..len.saturating_sub(1)];
    // Both indices off by one.
    let shifted = if len >= 3 { &vars.array[2..len - 1] } else { middle(vars) };
    answer_set(
        middle_slice_truth(vars),
        vec![
            format_array(keep_last),
            format_array(keep_first),
            format_array(shifted),
        ],
        shuffle_seed,
    )
}
