//! Convenience views over aggregated name data: ranking, filtering,
//! trimming and regrouping. Alphabetical listings are just the maps' own
//! iteration order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::aggregate::{NameCounts, YearNames};

/// Names ranked by count, most frequent first. Ties stay alphabetical.
pub fn by_count_desc(counts: &NameCounts) -> Vec<(&str, u64)> {
    let mut ranked: Vec<_> = counts.iter().map(|(name, c)| (name.as_str(), *c)).collect();
    ranked.sort_by_key(|&(_, count)| Reverse(count));
    ranked
}

/// Names ranked by count, least frequent first.
pub fn by_count_asc(counts: &NameCounts) -> Vec<(&str, u64)> {
    let mut ranked: Vec<_> = counts.iter().map(|(name, c)| (name.as_str(), *c)).collect();
    ranked.sort_by_key(|&(_, count)| count);
    ranked
}

/// Entries the predicate accepts, e.g. dropping the archive's `(?)`
/// placeholder or names below a count threshold.
pub fn filter_counts(counts: &NameCounts, mut keep: impl FnMut(&str, u64) -> bool) -> NameCounts {
    counts
        .iter()
        .filter(|(name, count)| keep(name, **count))
        .map(|(name, count)| (name.clone(), *count))
        .collect()
}

/// Leading slice of a ranked listing, e.g. the top 10% most used names.
/// The fraction is a decimal, 0.1 for 10%.
pub fn top_fraction<'a>(ranked: &'a [(&'a str, u64)], fraction: f64) -> &'a [(&'a str, u64)] {
    let n = (ranked.len() as f64 * fraction).round() as usize;
    &ranked[..n.min(ranked.len())]
}

/// Merges year keys into their decade, concatenating the name lists in
/// ascending year order.
pub fn group_by_decade(by_year: YearNames<i32>) -> YearNames<i32> {
    let mut by_decade = YearNames::new();
    for (year, names) in by_year {
        by_decade.entry(year / 10 * 10).or_default().extend(names);
    }
    by_decade
}

/// Recomposes each year's name list into per-name occurrence counts, the
/// same shape the plain counting extraction produces.
pub fn counts_per_year<K: Ord + Clone>(by_year: &YearNames<K>) -> BTreeMap<K, NameCounts> {
    by_year
        .iter()
        .map(|(year, names)| {
            let mut counts = NameCounts::new();
            for name in names {
                *counts.entry(name.clone()).or_insert(0) += 1;
            }
            (year.clone(), counts)
        })
        .collect()
}
