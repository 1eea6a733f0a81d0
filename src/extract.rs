use crate::aggregate::{NameCounts, NameSet, YearNames};
use crate::parse::IndexPage;
use crate::Result;

/// Marks the birth-info part of a person entry, as in
/// `Mary Ann Smith b. c 1830, Mere`.
const BIRTH_MARKER: &str = "b.";

/// Given names on the page, in encounter order.
///
/// With `exclude_middle_names` each name keeps only the part before its
/// first space, so `Mary Lucy Smith` becomes `Mary`.
pub fn extract_names(page: &IndexPage, exclude_middle_names: bool) -> Result<Vec<String>> {
    let names = page.name_links()?;
    Ok(if exclude_middle_names {
        names
            .into_iter()
            .map(|name| first_token(&name).to_string())
            .collect()
    } else {
        names
    })
}

/// Folds the page's names into per-name occurrence counts.
pub fn count_first_names(page: &IndexPage, exclude_middle_names: bool) -> Result<NameCounts> {
    let mut counts = NameCounts::new();
    for name in extract_names(page, exclude_middle_names)? {
        *counts.entry(name).or_insert(0) += 1;
    }
    Ok(counts)
}

/// The distinct names on the page, counts discarded.
pub fn first_name_set(page: &IndexPage, exclude_middle_names: bool) -> Result<NameSet> {
    Ok(extract_names(page, exclude_middle_names)?
        .into_iter()
        .collect())
}

/// Groups the page's names by the birth-year text exactly as found,
/// e.g. `"c 1830"`. Entries without a birth marker are dropped.
pub fn names_by_birth_year(
    page: &IndexPage,
    exclude_middle_names: bool,
) -> Result<YearNames<String>> {
    let mut by_year = YearNames::new();
    for (name, year_text) in birth_entries(page, exclude_middle_names)? {
        by_year.entry(year_text).or_default().push(name);
    }
    Ok(by_year)
}

/// Groups the page's names by integer birth year.
///
/// Approximate years such as `"c 1830"` are reduced to their digits first;
/// entries whose year text holds no parseable year are dropped along with
/// the marker-less ones.
pub fn names_by_birth_year_normalized(
    page: &IndexPage,
    exclude_middle_names: bool,
) -> Result<YearNames<i32>> {
    let mut by_year = YearNames::new();
    for (name, year_text) in birth_entries(page, exclude_middle_names)? {
        if let Some(year) = normalize_year(&year_text) {
            by_year.entry(year).or_default().push(name);
        }
    }
    Ok(by_year)
}

/// (name, raw year text) pairs for every entry carrying a birth marker.
///
/// An entry splits at its first `"b."`: the left side trimmed is the name,
/// the right side is birth info, cut at the first comma to isolate the
/// year token.
fn birth_entries(page: &IndexPage, exclude_middle_names: bool) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for entry in page.record_entries()? {
        let Some((name, birth_info)) = entry.split_once(BIRTH_MARKER) else {
            continue;
        };
        let name = name.trim();
        let name = if exclude_middle_names {
            first_token(name)
        } else {
            name
        };
        let year_text = match birth_info.split_once(',') {
            Some((year, _)) => year,
            None => birth_info,
        };
        pairs.push((name.to_string(), year_text.trim().to_string()));
    }
    Ok(pairs)
}

/// Reduces a year descriptor to an integer year.
///
/// Text containing any non-digit is stripped down to its digits, and only
/// the last four digits are kept. That keeps `"c 1830"` at 1830 and lets
/// year fragments that ran together resolve to their final year.
fn normalize_year(text: &str) -> Option<i32> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail = &digits[digits.len().saturating_sub(4)..];
    tail.parse().ok()
}

fn first_token(name: &str) -> &str {
    match name.split_once(' ') {
        Some((first, _)) => first,
        None => name,
    }
}
