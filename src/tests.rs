//! Unit tests for the `code_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → field-for-field identical exercise; different seeds vary |
//! | Structural | Distinct options; correct index in range; resolved prompts; id prefixes |
//! | Answer integrity | Indexed option equals the independently recomputed ground truth |
//! | Batch | Count, exclusions, per-template use cap, termination under narrow facets |
//! | Calendar day | Same-day stability of the date-derived exercise |
//! | Daily selection | Stability, freezing, completion fallback, level window |
//! | Progression | XP ladder, streak laws, perfect counter, badge permanence |
//! | Store | Record replacement, frozen challenge, blob round-trip, corrupt fallback |

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
    generate_batch, generate_exercise, generate_for_calendar_day, generate_from_template,
    generate_variables, select_daily, BatchRequest, Category, ContextObject, Difficulty,
    ExerciseKind, ExerciseRequest, ExerciseResult, GenerateError, GeneratedVariables,
    PoolExercise, ProgressStore, ProgressionStats, TemplateCatalog, TemplateSelector,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

const NOW: u64 = 1_700_000_000_000;

fn catalog() -> TemplateCatalog {
    TemplateCatalog::standard()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn result_on(id: &str, score: u8, xp: u64, day: NaiveDate) -> ExerciseResult {
    ExerciseResult {
        exercise_id: id.to_string(),
        category: Some(Category::Arrays),
        score,
        xp_earned: xp,
        time_spent_seconds: 45,
        day,
    }
}

fn daily_pool() -> Vec<PoolExercise> {
    let entries = [
        ("pool-1", Difficulty::Junior),
        ("pool-2", Difficulty::Junior),
        ("pool-3", Difficulty::Junior),
        ("pool-4", Difficulty::Mid),
        ("pool-5", Difficulty::Mid),
        ("pool-6", Difficulty::Senior),
    ];
    entries
        .iter()
        .map(|(id, difficulty)| PoolExercise {
            id: (*id).to_string(),
            title: format!("Exercise {id}"),
            category: Category::Numbers,
            difficulty: *difficulty,
        })
        .collect()
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_exercise() {
    let catalog = catalog();
    for template in catalog.templates() {
        let a = generate_from_template(template, 12345, NOW).unwrap();
        let b = generate_from_template(template, 12345, NOW).unwrap();
        assert_eq!(a, b, "exercise mismatch for `{}`", template.key);
    }
}

#[test]
fn different_seeds_produce_varied_prompts() {
    // Not a hard guarantee for any single pair, but across a wide range
    // the prompts must vary.
    let catalog = catalog();
    let template = catalog.by_key("array-sum").unwrap();
    let mut same_count = 0usize;
    let pairs = 40u64;
    for seed in 0..pairs {
        let a = generate_from_template(template, seed, NOW).unwrap();
        let b = generate_from_template(template, seed + 500, NOW).unwrap();
        if a.prompt == b.prompt {
            same_count += 1;
        }
    }
    assert!(
        same_count < pairs as usize / 4,
        "too many identical prompts across different seeds ({same_count}/{pairs})"
    );
}

#[test]
fn entropy_seed_produces_a_valid_exercise() {
    // Smoke test: `seed: None` must not panic and must satisfy invariants.
    let catalog = catalog();
    let exercise =
        generate_exercise(&catalog, ExerciseRequest::new(TemplateSelector::Random, NOW)).unwrap();
    assert!(!exercise.id.is_empty());
    assert!(!exercise.prompt.is_empty());
    assert!(exercise.correct_index < exercise.options.len());
}

#[test]
fn clock_distinguishes_ids_but_not_content() {
    let catalog = catalog();
    let template = catalog.by_key("modulo").unwrap();
    let a = generate_from_template(template, 42, 1_000).unwrap();
    let b = generate_from_template(template, 42, 2_000).unwrap();
    assert_ne!(a.id, b.id, "different clock readings must mint distinct ids");
    assert_eq!(a.prompt, b.prompt);
    assert_eq!(a.options, b.options);
    assert_eq!(a.correct_index, b.correct_index);
}

// ── structural invariants ────────────────────────────────────────────────────

#[test]
fn options_are_pairwise_distinct() {
    let catalog = catalog();
    for template in catalog.templates() {
        for seed in SEEDS {
            let exercise = generate_from_template(template, seed, NOW).unwrap();
            let mut sorted = exercise.options.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(
                sorted.len(),
                exercise.options.len(),
                "duplicate options in `{}` seed {seed}",
                template.key
            );
            assert!(exercise.options.len() >= 2, "`{}` produced one option", template.key);
        }
    }
}

#[test]
fn prompts_resolve_every_placeholder() {
    let catalog = catalog();
    for template in catalog.templates() {
        for seed in SEEDS {
            let exercise = generate_from_template(template, seed, NOW).unwrap();
            // A surviving `{token}` means a raw placeholder reached output.
            for token in [
                "{name}", "{name2}", "{number}", "{number2}", "{string}", "{string2}",
                "{array}", "{array2}", "{context}",
            ] {
                assert!(
                    !exercise.prompt.contains(token),
                    "`{}` leaked {token} at seed {seed}",
                    template.key
                );
            }
        }
    }
}

#[test]
fn id_prefix_matches_kind() {
    let catalog = catalog();
    for template in catalog.templates() {
        let exercise = generate_from_template(template, 9, NOW).unwrap();
        let prefix = match template.kind {
            ExerciseKind::Quiz => "QZ-",
            ExerciseKind::Challenge => "CH-",
            ExerciseKind::Review => "RV-",
        };
        assert!(
            exercise.id.starts_with(prefix),
            "id `{}` lacks prefix for {:?}",
            exercise.id,
            template.kind
        );
    }
}

// ── answer integrity ─────────────────────────────────────────────────────────

#[test]
fn indexed_option_equals_recomputed_ground_truth() {
    let catalog = catalog();
    for template in catalog.templates() {
        for seed in SEEDS {
            let exercise = generate_from_template(template, seed, NOW).unwrap();
            // Recompute the answer independently from the same vars.
            let vars = generate_variables(&template.constraints, seed);
            let expected = (template.ground_truth)(&vars);
            assert_eq!(
                exercise.options[exercise.correct_index], expected,
                "`{}` indexed option diverged from ground truth at seed {seed}",
                template.key
            );
        }
    }
}

#[test]
fn unknown_template_key_is_an_error() {
    let catalog = catalog();
    let err = generate_exercise(
        &catalog,
        ExerciseRequest::seeded(TemplateSelector::Key("no-such".to_string()), 1, NOW),
    );
    assert_eq!(err, Err(GenerateError::UnknownTemplate("no-such".to_string())));
}

#[test]
fn empty_catalog_is_an_error() {
    let empty = TemplateCatalog::from_templates(Vec::new());
    let err = generate_exercise(&empty, ExerciseRequest::new(TemplateSelector::Random, NOW));
    assert_eq!(err, Err(GenerateError::EmptyCatalog));
}

// ── batch generation ─────────────────────────────────────────────────────────

fn batch_request(count: usize) -> BatchRequest {
    BatchRequest {
        count,
        difficulty: None,
        category: None,
        exclude_keys: Vec::new(),
        seed: 7_000,
        now_millis: NOW,
    }
}

#[test]
fn batch_honours_count_and_is_deterministic() {
    let catalog = catalog();
    let a = generate_batch(&catalog, &batch_request(5)).unwrap();
    let b = generate_batch(&catalog, &batch_request(5)).unwrap();
    assert_eq!(a.len(), 5);
    assert_eq!(a, b);
}

#[test]
fn batch_never_uses_a_template_more_than_twice() {
    let catalog = catalog();
    let batch = generate_batch(&catalog, &batch_request(10)).unwrap();
    let mut counts: std::collections::HashMap<&str, u32> = std::collections::HashMap::new();
    for exercise in &batch {
        *counts.entry(exercise.template_key.as_str()).or_insert(0) += 1;
    }
    assert!(counts.values().all(|c| *c <= 2), "a template appeared 3+ times: {counts:?}");
}

#[test]
fn batch_respects_exclusions() {
    let catalog = catalog();
    let mut request = batch_request(6);
    request.exclude_keys = vec!["array-sum".to_string(), "modulo".to_string()];
    let batch = generate_batch(&catalog, &request).unwrap();
    assert!(batch
        .iter()
        .all(|e| e.template_key != "array-sum" && e.template_key != "modulo"));
}

#[test]
fn batch_terminates_under_narrow_facets() {
    // Only one Logic template exists; asking for 50 must stop at the scan
    // cap with at most two uses of it, not spin.
    let catalog = catalog();
    let mut request = batch_request(50);
    request.category = Some(Category::Logic);
    let batch = generate_batch(&catalog, &request).unwrap();
    assert!(batch.len() <= 2, "narrow facet produced {} exercises", batch.len());
    assert!(batch.iter().all(|e| e.category == Category::Logic));
}

#[test]
fn batch_relaxes_unsatisfiable_exclusions() {
    let catalog = catalog();
    let mut request = batch_request(3);
    request.category = Some(Category::Logic);
    request.exclude_keys = vec!["boolean-guard".to_string()];
    // Everything in the facet is excluded: the exclusion is dropped
    // rather than returning nothing.
    let batch = generate_batch(&catalog, &request).unwrap();
    assert!(!batch.is_empty());
}

#[test]
fn batch_facet_filters_apply() {
    let catalog = catalog();
    let mut request = batch_request(4);
    request.difficulty = Some(Difficulty::Junior);
    let batch = generate_batch(&catalog, &request).unwrap();
    assert!(batch.iter().all(|e| e.difficulty == Difficulty::Junior));
}

// ── calendar-day generation ──────────────────────────────────────────────────

#[test]
fn calendar_day_ignores_time_of_day() {
    // The function takes only a date: repeat calls within the day cannot
    // disagree, whatever the wall clock says.
    let catalog = catalog();
    let day = date(2025, 6, 1);
    let morning = generate_for_calendar_day(&catalog, day).unwrap();
    let evening = generate_for_calendar_day(&catalog, day).unwrap();
    assert_eq!(morning, evening);
    assert!(morning.id.starts_with("DAY-20250601-"));
}

// ── scenario: filter > threshold then double ─────────────────────────────────

fn scenario_vars() -> GeneratedVariables {
    GeneratedVariables {
        name: "Ada".to_string(),
        name2: "Grace".to_string(),
        number: 1,
        number2: 2,
        string: "apple".to_string(),
        string2: "plum".to_string(),
        array: vec![1, 2, 3, 4, 5, 6],
        array2: vec![2, 4, 6],
        context: ContextObject {
            name: "Alan".to_string(),
            age: 41,
            email: "alan@example.com".to_string(),
            active: true,
            score: 87,
        },
        seed: 42,
    }
}

#[test]
fn filter_then_double_reference_case() {
    let catalog = catalog();
    let template = catalog.by_key("filter-then-double").unwrap();
    let vars = scenario_vars();

    assert_eq!((template.ground_truth)(&vars), "[6,8,10,12]");

    let set = (template.build_answers)(&vars, 42);
    assert_eq!(set.options.len(), 4, "expected 4 distinct options: {:?}", set.options);
    let mut sorted = set.options.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 4);
    assert_eq!(set.options[set.correct_index], "[6,8,10,12]");
}

// ── daily selection ──────────────────────────────────────────────────────────

#[test]
fn daily_pick_is_stable_for_a_fixed_store() {
    let pool = daily_pool();
    let none = HashSet::new();
    let day = date(2025, 6, 1);
    let a = select_daily(&pool, day, Some("u1"), Some(Difficulty::Junior), &none).unwrap();
    for _ in 0..10 {
        let b = select_daily(&pool, day, Some("u1"), Some(Difficulty::Junior), &none).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn frozen_challenge_survives_changed_inputs() {
    // Once the record exists, re-querying returns the recorded id even if
    // the derivation inputs (completed set) would now pick differently.
    let pool = daily_pool();
    let day = date(2025, 6, 1);
    let mut store = ProgressStore::default();

    let first = store
        .today_challenge(&pool, day, Some("u1"), Some(Difficulty::Junior))
        .unwrap();

    // Complete unrelated exercises, which changes the completed set.
    for id in ["pool-2", "pool-3"] {
        if *id != first.exercise_id {
            store.record_exercise_result(result_on(id, 90, 10, day), 0);
        }
    }

    let again = store
        .today_challenge(&pool, day, Some("u1"), Some(Difficulty::Junior))
        .unwrap();
    assert_eq!(first.exercise_id, again.exercise_id);
}

#[test]
fn completing_the_challenge_reflects_in_the_query() {
    let pool = daily_pool();
    let day = date(2025, 6, 1);
    let mut store = ProgressStore::default();

    let challenge = store.today_challenge(&pool, day, None, None).unwrap();
    assert!(!challenge.completed);

    assert!(store.record_daily_completion(day, 95, NOW));
    let challenge = store.today_challenge(&pool, day, None, None).unwrap();
    assert!(challenge.completed);
    assert_eq!(challenge.score, Some(95));

    // Completing a never-queried date does nothing.
    assert!(!store.record_daily_completion(date(2025, 6, 9), 80, NOW));
}

#[test]
fn daily_streak_over_challenge_records() {
    let pool = daily_pool();
    let mut store = ProgressStore::default();
    for d in [1, 2, 3] {
        store.today_challenge(&pool, date(2025, 6, d), None, None).unwrap();
        store.record_daily_completion(date(2025, 6, d), 90, NOW);
    }
    assert_eq!(store.daily_streak(date(2025, 6, 3)), 3);
    assert_eq!(store.daily_streak(date(2025, 6, 4)), 3);
    assert_eq!(store.daily_streak(date(2025, 6, 6)), 0);
}

// ── progression ──────────────────────────────────────────────────────────────

#[test]
fn xp_ladder_hits_expected_levels() {
    let day = date(2025, 1, 1);
    let mut stats = ProgressionStats::default();
    assert_eq!(stats.level(), 1);

    stats = stats.apply(&result_on("a", 80, 120, day));
    assert_eq!(stats.level(), 2);
    stats = stats.apply(&result_on("b", 80, 600, day));
    assert_eq!(stats.total_xp, 720);
    assert_eq!(stats.level(), 6);
    stats = stats.apply(&result_on("c", 80, 1330, day));
    assert_eq!(stats.total_xp, 2050);
    assert_eq!(stats.level(), 11);
}

#[test]
fn level_never_decreases_under_gains() {
    let day = date(2025, 1, 1);
    let mut stats = ProgressionStats::default();
    let mut previous = stats.level();
    for gain in [0, 5, 90, 13, 200, 1, 999, 47, 2500] {
        stats = stats.apply(&result_on("x", 80, gain, day));
        assert!(stats.level() >= previous);
        previous = stats.level();
    }
}

#[test]
fn streak_sequence_with_gap() {
    // Activity on the 1st, 2nd, 3rd, then the 5th: streaks 1, 2, 3, 1.
    let mut stats = ProgressionStats::default();
    let expected = [(1, 1), (2, 2), (3, 3), (5, 1)];
    for (d, streak) in expected {
        stats = stats.apply(&result_on("x", 80, 10, date(2025, 1, d)));
        assert_eq!(stats.current_streak, streak, "after day {d}");
    }
    assert_eq!(stats.longest_streak, 3);
}

#[test]
fn badges_are_never_revoked() {
    let mut store = ProgressStore::default();
    for d in [1, 2, 3] {
        store.record_exercise_result(result_on(&format!("ex-{d}"), 80, 10, date(2025, 1, d)), 0);
    }
    assert!(store.earned_badges.contains("streak-3"));

    // Break the streak; the badge stays.
    store.record_exercise_result(result_on("ex-9", 80, 10, date(2025, 1, 9)), 0);
    assert_eq!(store.stats.current_streak, 1);
    assert!(store.earned_badges.contains("streak-3"));
}

#[test]
fn badge_progress_query_reports_current_and_target() {
    let mut store = ProgressStore::default();
    for i in 0..4 {
        store.record_exercise_result(result_on(&format!("ex-{i}"), 80, 10, date(2025, 1, 1)), 0);
    }
    let progress = store.badge_progress("ten-down").unwrap();
    assert_eq!(progress.current, 4);
    assert_eq!(progress.target, 10);
    assert!(store.badge_progress("no-such-badge").is_none());
}

// ── store persistence ────────────────────────────────────────────────────────

#[test]
fn full_store_round_trips_through_json() {
    let pool = daily_pool();
    let mut store = ProgressStore::default();
    store.record_exercise_result(result_on("ex-1", 100, 120, date(2025, 6, 1)), 5_000);
    store.today_challenge(&pool, date(2025, 6, 1), Some("u1"), None).unwrap();
    store.record_daily_completion(date(2025, 6, 1), 100, 6_000);

    let raw = store.to_json().unwrap();
    let restored = ProgressStore::from_json(&raw);
    assert_eq!(store, restored);
}

#[test]
fn corrupt_blob_never_partially_applies() {
    let raw = "{\"stats\":{\"total_xp\":50},\"completed\":\"oops\"}";
    let store = ProgressStore::from_json(raw);
    assert_eq!(store.stats.total_xp, 0, "partial state leaked from corrupt blob");
    assert!(store.completed.is_empty());
}
