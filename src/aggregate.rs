use std::collections::{BTreeMap, BTreeSet};

/// First name to number of records carrying it. Counts of present keys are
/// always at least 1, absence means zero.
pub type NameCounts = BTreeMap<String, u64>;

/// Distinct first names, the deduplicated output shape.
pub type NameSet = BTreeSet<String>;

/// Birth-year key to the names registered under it, duplicates retained in
/// append order. The key is the raw year text or a normalized integer year.
pub type YearNames<K> = BTreeMap<K, Vec<String>>;

/// Fold operation combining page level aggregates.
///
/// Merging must be commutative and associative so that worker results can
/// be folded in any completion order without changing the outcome. For
/// name lists that holds up to the multiset of names per key; the order
/// within a key is append order.
pub trait Merge: Default {
    fn merge(self, other: Self) -> Self;
}

impl Merge for NameCounts {
    /// Key union; keys present in both maps sum their counts.
    fn merge(self, other: Self) -> Self {
        let mut merged = self;
        for (name, count) in other {
            *merged.entry(name).or_insert(0) += count;
        }
        merged
    }
}

impl Merge for NameSet {
    fn merge(self, other: Self) -> Self {
        let mut merged = self;
        merged.extend(other);
        merged
    }
}

impl<K: Ord> Merge for YearNames<K> {
    /// Key union; keys present in both maps concatenate `self`'s list
    /// followed by `other`'s.
    fn merge(self, other: Self) -> Self {
        let mut merged = self;
        for (year, names) in other {
            merged.entry(year).or_default().extend(names);
        }
        merged
    }
}
