//! Detects spelling variants of a name, e.g. Mary/Marie or Sara/Sarah,
//! with a Jaro-Winkler similarity score and an optional stemming
//! pre-processor.

use std::collections::{BTreeMap, BTreeSet};

/// Weight of the common-prefix bonus in the Winkler adjustment.
pub const DEFAULT_SCALING_FACTOR: f64 = 0.1;

/// The Winkler adjustment never rewards more than this many prefix chars.
const MAX_PREFIX_BONUS: usize = 4;

/// Candidates scoring strictly above `threshold` against `target`.
pub fn find_variants<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> BTreeSet<String> {
    find_variant_scores(target, candidates, threshold)
        .into_keys()
        .collect()
}

/// Like [`find_variants`], but keeps each candidate's similarity score.
pub fn find_variant_scores<'a>(
    target: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> BTreeMap<String, f64> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = jaro_winkler(target, candidate);
            (score > threshold).then(|| (candidate.to_string(), score))
        })
        .collect()
}

/// Jaro similarity of two strings, in [0, 1], case-insensitive.
///
/// Matching uses a positional window of `max(|x|, |y|) / 2` and takes the
/// first in-window equal character of `y` for each character of `x`, not
/// the best one. Both choices differ from the textbook formulation and are
/// kept as the reference behavior for reproducible scores.
pub fn jaro(x: &str, y: &str) -> f64 {
    let x = fold_upper(x);
    let y = fold_upper(y);
    let (matches, displaced) = scan_matches(&x, &y);
    if matches == 0 {
        return 0.0;
    }
    let m = matches as f64;
    let t = displaced as f64 / 2.0;
    (m / x.len() as f64 + m / y.len() as f64 + (m - t) / m) / 3.0
}

/// Jaro similarity boosted for a shared prefix of up to four characters:
/// `jaro + scaling_factor * min(4, prefix) * (1 - jaro)`.
pub fn jaro_winkler(x: &str, y: &str) -> f64 {
    jaro_winkler_scaled(x, y, DEFAULT_SCALING_FACTOR)
}

/// [`jaro_winkler`] with a caller-chosen scaling factor.
pub fn jaro_winkler_scaled(x: &str, y: &str, scaling_factor: f64) -> f64 {
    let jaro = jaro(x, y);
    if jaro == 0.0 {
        return 0.0;
    }
    let prefix = common_prefix_length(x, y).min(MAX_PREFIX_BONUS);
    jaro + scaling_factor * prefix as f64 * (1.0 - jaro)
}

/// Number of matching characters between the two strings.
pub fn matching_characters(x: &str, y: &str) -> usize {
    scan_matches(&fold_upper(x), &fold_upper(y)).0
}

/// Number of matching characters sitting at different positions in the two
/// strings, divided by two.
pub fn transpositions(x: &str, y: &str) -> f64 {
    scan_matches(&fold_upper(x), &fold_upper(y)).1 as f64 / 2.0
}

/// Length of the case-insensitive common prefix, uncapped.
pub fn common_prefix_length(x: &str, y: &str) -> usize {
    fold_upper(x)
        .into_iter()
        .zip(fold_upper(y))
        .take_while(|(a, b)| a == b)
        .count()
}

/// Strips strippable trailing characters off a name, then optionally
/// collapses adjacent duplicate characters, so Marrianna with the vowels
/// and y strippable stems to Marian.
///
/// Duplicate collapsing is a single left-to-right pass and removes one
/// character per adjacent pair, so runs of three or more identical
/// characters do not collapse fully.
pub fn stem(name: &str, strip_trailing: &[char], collapse_duplicate_pairs: bool) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    while let Some(last) = chars.last() {
        if strip_trailing.contains(last) {
            chars.pop();
        } else {
            break;
        }
    }

    if !collapse_duplicate_pairs {
        return chars.into_iter().collect();
    }

    let mut stemmed = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        stemmed.push(chars[i]);
        if i + 1 < chars.len() && chars[i] == chars[i + 1] {
            i += 2;
        } else {
            i += 1;
        }
    }
    stemmed
}

/// One pass over `x` looking for in-window equal characters of `y`.
/// Returns how many characters matched and how many of those matched at a
/// different position.
fn scan_matches(x: &[char], y: &[char]) -> (usize, usize) {
    let window = x.len().max(y.len());
    let mut matches = 0;
    let mut displaced = 0;
    for (i, cx) in x.iter().enumerate() {
        for (j, cy) in y.iter().enumerate() {
            // First equal character within |i - j| < window / 2 wins.
            if cx == cy && 2 * i.abs_diff(j) < window {
                matches += 1;
                if i != j {
                    displaced += 1;
                }
                break;
            }
        }
    }
    (matches, displaced)
}

fn fold_upper(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_uppercase).collect()
}
