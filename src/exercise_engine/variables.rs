//! Variable pools and context synthesis.
//!
//! Templates never sample directly: they consume a [`GeneratedVariables`]
//! bundle built here. Each field is derived from `seed` plus a distinct,
//! stable offset so that fields do not correlate and adding a field never
//! shifts an existing one. Identical `(constraints, seed)` pairs produce
//! bit-identical bundles.

use serde::{Deserialize, Serialize};

use crate::exercise_engine::sampler;

/// First names used for `{name}` / `{name2}` placeholders.
pub const NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Dennis", "Katherine",
    "Donald", "Margaret", "Linus", "Radia", "Niklaus",
];

/// Sample words used for `{string}` / `{string2}` placeholders.
pub const WORDS: &[&str] = &[
    "apple", "banana", "cherry", "mango", "orange", "papaya", "quince",
    "raspberry", "fig", "plum",
];

// Per-field seed offsets. Distinct and stable: never renumber an existing
// offset, only append.
const SEED_NAME: u64 = 1;
const SEED_NAME2: u64 = 2;
const SEED_NUMBER: u64 = 3;
const SEED_NUMBER2: u64 = 4;
const SEED_STRING: u64 = 5;
const SEED_STRING2: u64 = 6;
const SEED_ARRAY_LEN: u64 = 7;
const SEED_ARRAY2_LEN: u64 = 8;
const SEED_CONTEXT_AGE: u64 = 9;
const SEED_CONTEXT_ACTIVE: u64 = 10;
const SEED_CONTEXT_SCORE: u64 = 11;
const SEED_CONTEXT_NAME: u64 = 12;
// Array elements get a block of offsets each; lengths are bounded well
// below the block size.
const SEED_ARRAY_BASE: u64 = 100;
const SEED_ARRAY2_BASE: u64 = 200;

/// Bounds for numeric and array sampling. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableConstraints {
    /// Range for `number` and `number2`.
    pub number_range: (i64, i64),
    /// Range for the length of `array` and `array2`.
    pub array_len_range: (usize, usize),
    /// Range for the elements of `array` and `array2`.
    pub array_value_range: (i64, i64),
}

impl Default for VariableConstraints {
    fn default() -> Self {
        VariableConstraints {
            number_range: (1, 20),
            array_len_range: (4, 7),
            array_value_range: (1, 12),
        }
    }
}

/// A small structured record for object-access exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextObject {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub active: bool,
    pub score: i64,
}

impl ContextObject {
    /// Render as a source-style object literal for prompts.
    pub fn render(&self) -> String {
        format!(
            "{{ name: \"{}\", age: {}, active: {}, score: {} }}",
            self.name, self.age, self.active, self.score
        )
    }
}

/// The full variable bundle a template consumes.
///
/// Invariant: pure function of `(constraints, seed)` — callers may rebuild
/// it at any time and get the identical value back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVariables {
    pub name: String,
    /// Always distinct from `name`.
    pub name2: String,
    pub number: i64,
    pub number2: i64,
    pub string: String,
    /// Always distinct from `string`.
    pub string2: String,
    pub array: Vec<i64>,
    pub array2: Vec<i64>,
    pub context: ContextObject,
    pub seed: u64,
}

fn pick_name(seed: u64) -> String {
    sampler::pick_one(seed, NAMES).copied().unwrap_or("Ada").to_string()
}

fn pick_word(seed: u64) -> String {
    sampler::pick_one(seed, WORDS).copied().unwrap_or("apple").to_string()
}

/// Pick from `pool` excluding `taken`; the pools hold >1 entry so the
/// filtered slice is never empty.
fn pick_distinct(seed: u64, pool: &[&str], taken: &str) -> String {
    let remaining: Vec<&str> = pool.iter().copied().filter(|c| *c != taken).collect();
    sampler::pick_one(seed, &remaining)
        .copied()
        .unwrap_or(taken)
        .to_string()
}

fn sample_array(constraints: &VariableConstraints, len_seed: u64, element_base: u64) -> Vec<i64> {
    let (min_len, max_len) = constraints.array_len_range;
    let len = sampler::in_range(len_seed, min_len as i64, max_len as i64) as usize;
    let (lo, hi) = constraints.array_value_range;
    (0..len)
        .map(|i| sampler::in_range(element_base + i as u64, lo, hi))
        .collect()
}

/// Build the variable bundle for `(constraints, seed)`.
pub fn generate_variables(constraints: &VariableConstraints, seed: u64) -> GeneratedVariables {
    let name = pick_name(seed + SEED_NAME);
    let name2 = pick_distinct(seed + SEED_NAME2, NAMES, &name);
    let string = pick_word(seed + SEED_STRING);
    let string2 = pick_distinct(seed + SEED_STRING2, WORDS, &string);

    let (num_lo, num_hi) = constraints.number_range;
    let context_name = pick_name(seed + SEED_CONTEXT_NAME);
    let context = ContextObject {
        email: format!("{}@example.com", context_name.to_lowercase()),
        name: context_name,
        age: sampler::in_range(seed + SEED_CONTEXT_AGE, 18, 65),
        active: sampler::unit(seed + SEED_CONTEXT_ACTIVE) < 0.5,
        score: sampler::in_range(seed + SEED_CONTEXT_SCORE, 0, 100),
    };

    GeneratedVariables {
        name,
        name2,
        number: sampler::in_range(seed + SEED_NUMBER, num_lo, num_hi),
        number2: sampler::in_range(seed + SEED_NUMBER2, num_lo, num_hi),
        string,
        string2,
        array: sample_array(constraints, seed + SEED_ARRAY_LEN, seed + SEED_ARRAY_BASE),
        array2: sample_array(constraints, seed + SEED_ARRAY2_LEN, seed + SEED_ARRAY2_BASE),
        context,
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_give_identical_bundles() {
        let constraints = VariableConstraints::default();
        for seed in [0u64, 1, 42, 999, 0xDEAD_BEEF] {
            let a = generate_variables(&constraints, seed);
            let b = generate_variables(&constraints, seed);
            assert_eq!(a, b, "bundle mismatch for seed {seed}");
        }
    }

    #[test]
    fn paired_fields_are_distinct() {
        let constraints = VariableConstraints::default();
        for seed in 0..300u64 {
            let vars = generate_variables(&constraints, seed);
            assert_ne!(vars.name, vars.name2, "names collide for seed {seed}");
            assert_ne!(vars.string, vars.string2, "strings collide for seed {seed}");
        }
    }

    #[test]
    fn constraints_bound_samples() {
        let constraints = VariableConstraints {
            number_range: (2, 4),
            array_len_range: (5, 5),
            array_value_range: (10, 19),
        };
        for seed in 0..100u64 {
            let vars = generate_variables(&constraints, seed);
            assert!((2..=4).contains(&vars.number));
            assert!((2..=4).contains(&vars.number2));
            assert_eq!(vars.array.len(), 5);
            assert_eq!(vars.array2.len(), 5);
            assert!(vars.array.iter().all(|v| (10..=19).contains(v)));
        }
    }
}
