use serde::Serialize;
use tracing::debug;

use crate::input::{normalize_word, WordPair};
use crate::levenshtein::{full_table_distance, rolling_row_distance};

/// Both distances for one pair of words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordComparison {
    pub first: String,
    pub second: String,
    pub full_table: usize,
    pub rolling_row: usize,
}

impl WordComparison {
    pub fn new(first: &[char], second: &[char]) -> Self {
        WordComparison {
            first: first.iter().collect(),
            second: second.iter().collect(),
            full_table: full_table_distance(first, second),
            rolling_row: rolling_row_distance(first, second),
        }
    }

    pub fn variants_agree(&self) -> bool {
        self.full_table == self.rolling_row
    }
}

/// Compares every pair, calling `progress(done, total)` roughly every five
/// percent and once at the end.
pub fn compare_pairs<F>(pairs: Vec<WordPair>, keep_case: bool, mut progress: F) -> Vec<WordComparison>
where
    F: FnMut(usize, usize),
{
    let total = pairs.len();
    let step = (total / 20).max(1);
    let mut comparisons = Vec::with_capacity(total);

    for (idx, (first, second)) in pairs.into_iter().enumerate() {
        let first = normalize_word(&first, keep_case);
        let second = normalize_word(&second, keep_case);
        let comparison = WordComparison::new(&first, &second);
        debug!(
            first = %comparison.first,
            second = %comparison.second,
            distance = comparison.full_table,
            "compared pair"
        );
        comparisons.push(comparison);

        let done = idx + 1;
        if done % step == 0 || done == total {
            progress(done, total);
        }
    }

    comparisons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> WordPair {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn comparison_runs_both_variants() {
        let first: Vec<char> = "kitten".chars().collect();
        let second: Vec<char> = "sitting".chars().collect();
        let cmp = WordComparison::new(&first, &second);
        assert_eq!((cmp.full_table, cmp.rolling_row), (3, 3));
        assert!(cmp.variants_agree());
        assert_eq!(cmp.first, "kitten");
    }

    #[test]
    fn pairs_are_lowercased_unless_case_is_kept() {
        let pairs = vec![pair("Cat", "cat"), pair("DOG", "dig")];

        let folded = compare_pairs(pairs.clone(), false, |_, _| {});
        assert_eq!(folded[0].full_table, 0);
        assert_eq!(folded[0].first, "cat");
        assert_eq!(folded[1].full_table, 1);

        let literal = compare_pairs(pairs, true, |_, _| {});
        assert_eq!(literal[0].full_table, 1);
        assert_eq!(literal[1].full_table, 3);
        assert!(literal.iter().all(WordComparison::variants_agree));
    }

    #[test]
    fn progress_ends_with_total() {
        let pairs: Vec<WordPair> = (0..45).map(|i| pair("a", &"b".repeat(i))).collect();
        let mut calls = Vec::new();
        compare_pairs(pairs, false, |done, total| calls.push((done, total)));
        assert_eq!(calls.first(), Some(&(2, 45)));
        assert_eq!(calls.last(), Some(&(45, 45)));
        assert!(calls.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn empty_input_reports_nothing() {
        let mut called = false;
        assert!(compare_pairs(Vec::new(), false, |_, _| called = true).is_empty());
        assert!(!called);
    }
}
