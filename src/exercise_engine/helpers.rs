//! Shared builders used by every template module.
//!
//! Templates differ only in the answer math; prompt rendering, distractor
//! dedup, and the seeded option shuffle are centralised here so the option
//! list and correct index are always produced by one code path.

use crate::exercise_engine::{
    catalog::TemplateError,
    models::AnswerSet,
    sampler,
    variables::GeneratedVariables,
};

/// Upper bound on the option list; the correct answer plus up to three
/// surviving distractors.
pub const MAX_OPTIONS: usize = 4;

/// Format an integer array the way prompts and options show it: `[6,8,10,12]`.
pub fn format_array(values: &[i64]) -> String {
    let inner = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
    format!("[{}]", inner)
}

/// Build the option set from a correct answer and candidate distractors.
///
/// Distractors are taken in order, dropping any that duplicate the correct
/// answer or an earlier distractor, until [`MAX_OPTIONS`] options exist.
/// The surviving list is shuffled with `shuffle_seed` and the correct index
/// located in the shuffled order — one atomic computation, so the index can
/// never point at a stale position.
pub fn answer_set(correct: String, distractors: Vec<String>, shuffle_seed: u64) -> AnswerSet {
    let mut options = vec![correct.clone()];
    for d in distractors {
        if options.len() == MAX_OPTIONS {
            break;
        }
        if !options.contains(&d) {
            options.push(d);
        }
    }
    let options = sampler::shuffle(shuffle_seed, &options);
    // The correct answer is always present: dedup above never removes it
    // and the shuffle is a permutation.
    let correct_index = options.iter().position(|o| *o == correct).unwrap_or(0);
    AnswerSet { options, correct_index }
}

/// Substitute `{placeholder}` tokens in `text` from the variable bundle.
///
/// A token left unresolved after substitution is an authoring defect and
/// returns [`TemplateError::UnresolvedPlaceholder`]; it must never reach a
/// user as raw token text. Rendered values may contain braces (the context
/// object literal does) — only `{word}`-shaped tokens are flagged.
pub fn render_prompt(
    template_key: &str,
    text: &str,
    vars: &GeneratedVariables,
) -> Result<String, TemplateError> {
    let pairs: [(&str, String); 12] = [
        ("{name}", vars.name.clone()),
        ("{name2}", vars.name2.clone()),
        ("{number}", vars.number.to_string()),
        ("{number2}", vars.number2.to_string()),
        ("{string}", vars.string.clone()),
        ("{string2}", vars.string2.clone()),
        ("{array}", format_array(&vars.array)),
        ("{array2}", format_array(&vars.array2)),
        ("{context}", vars.context.render()),
        ("{context_name}", vars.context.name.clone()),
        ("{context_age}", vars.context.age.to_string()),
        ("{context_score}", vars.context.score.to_string()),
    ];

    let mut out = text.to_string();
    for (token, value) in pairs {
        out = out.replace(token, &value);
    }

    if let Some(token) = find_unresolved_token(&out) {
        return Err(TemplateError::UnresolvedPlaceholder {
            key: template_key.to_string(),
            token,
        });
    }
    Ok(out)
}

/// Scan for a `{word}` token (letters, digits, underscores only).
fn find_unresolved_token(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len()
                && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
            {
                end += 1;
            }
            if end > start && end < bytes.len() && bytes[end] == b'}' {
                return Some(text[start..end].to_string());
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::variables::{generate_variables, VariableConstraints};

    #[test]
    fn answer_set_drops_duplicates_and_keeps_correct() {
        let set = answer_set(
            "10".to_string(),
            vec!["10".into(), "11".into(), "11".into(), "9".into(), "8".into()],
            42,
        );
        assert!(set.options.len() <= MAX_OPTIONS);
        let mut sorted = set.options.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), set.options.len(), "duplicate options survived");
        assert_eq!(set.options[set.correct_index], "10");
    }

    #[test]
    fn render_rejects_unknown_tokens() {
        let vars = generate_variables(&VariableConstraints::default(), 1);
        let err = render_prompt("t", "value of {bogus}?", &vars);
        assert!(matches!(
            err,
            Err(TemplateError::UnresolvedPlaceholder { ref token, .. }) if token == "bogus"
        ));
    }

    #[test]
    fn render_allows_context_literal_braces() {
        let vars = generate_variables(&VariableConstraints::default(), 1);
        let out = render_prompt("t", "profile = {context}", &vars);
        assert!(out.is_ok(), "context literal braces were misread as a token");
    }

    #[test]
    fn format_array_has_no_spaces() {
        assert_eq!(format_array(&[6, 8, 10, 12]), "[6,8,10,12]");
        assert_eq!(format_array(&[]), "[]");
    }
}
