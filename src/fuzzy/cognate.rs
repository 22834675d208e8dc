// File: src/fuzzy/cognate.rs
use crate::fuzzy::distance::{edit_distance, longest_common_substring};

/// Orthographic rewrites applied, in this order, before measuring edit distance.
/// They fold spelling variants that commonly separate cognate names
/// ("stephan"/"stefan", "yale"/"iale", "johnson"/"jonson").
const SUBSTITUTIONS: [(&str, &str); 4] = [("ph", "f"), ("y", "i"), ("hn", "n"), ("ha", "a")];

/// Forms longer than this also blend in the longest-common-substring ratio.
const LCS_LENGTH_CUTOFF: usize = 5;

fn normalize(form: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(form.to_string(), |acc, &(from, to)| acc.replace(from, to))
}

/// Scores how alike two forms look on the surface, independent of meaning.
///
/// Forms whose first (lower-cased) characters differ score 0. Otherwise the score is
/// `1 - (d + 1) / (min_len + 1)` where `d` is the edit distance between the
/// normalized forms and lengths are those of the lower-cased inputs; for forms longer
/// than five characters this is averaged with `lcs / min_len`.
///
/// The result is symmetric but not clamped: long, dissimilar forms that share only
/// their first letter can score below zero.
pub fn cognate_score(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    match (a.chars().next(), b.chars().next()) {
        (Some(first_a), Some(first_b)) if first_a == first_b => {}
        _ => return 0.0,
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    let distance = edit_distance(&normalize(&a), &normalize(&b)) + 1;
    let mut score = 1.0 - distance as f64 / (len_a + 1).min(len_b + 1) as f64;

    let shorter = len_a.min(len_b);
    if shorter > LCS_LENGTH_CUTOFF {
        let lcs_ratio = longest_common_substring(&a, &b) as f64 / shorter as f64;
        score = (score + lcs_ratio) / 2.0;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_different_initials_score_zero() {
        assert_eq!(cognate_score("apple", "banana"), 0.0);
        assert_eq!(cognate_score("romania", "germania"), 0.0);
        // Substitutions are applied only after the first-letter gate.
        assert_eq!(cognate_score("yale", "iale"), 0.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(cognate_score("", "roma"), 0.0);
        assert_eq!(cognate_score("roma", ""), 0.0);
        assert_eq!(cognate_score("", ""), 0.0);
    }

    #[test]
    fn test_short_forms_use_edit_distance_only() {
        // "john" normalizes to "jon": d = 0 + 1, min length 3 + 1
        assert_close(cognate_score("john", "jon"), 0.75);
        assert_close(cognate_score("ana", "anna"), 0.5);
        assert_close(cognate_score("paris", "parisul"), 0.5);
    }

    #[test]
    fn test_long_forms_blend_lcs() {
        assert_close(cognate_score("romania", "romania"), 0.9375);
        assert_close(cognate_score("germany", "germania"), 0.8035714285714286);
        assert_close(cognate_score("stephan", "stefan"), 0.6785714285714286);
        assert_close(cognate_score("london", "londra"), 0.6190476190476191);
    }

    #[test]
    fn test_case_insensitive() {
        assert_close(cognate_score("Moscow", "MOSCOVA"), cognate_score("moscow", "moscova"));
    }

    #[test]
    fn test_symmetric() {
        for (a, b) in [("bucharest", "bucuresti"), ("stephan", "stefan"), ("ana", "anna")] {
            assert_eq!(cognate_score(a, b), cognate_score(b, a));
        }
    }

    #[test]
    fn test_long_dissimilar_forms_go_negative() {
        let score = cognate_score("abcdefghij", "azzzzzzzzzzzzzzzzzzzzzz");
        assert_close(score, -0.4954545454545454);
    }

    #[test]
    fn test_normalize_order() {
        assert_eq!(normalize("philharmonia"), "filarmonia");
        assert_eq!(normalize("johnny"), "jonni");
    }
}
