//! Filter-sort-paginate pipeline
//!
//! Derives the visible slice of the catalog from the current search term,
//! category, sort key and display limit. Everything here is a pure function
//! of its inputs; callers recompute on every state change.

use crate::model::style::StyleRecord;
use crate::model::ui::SortKey;
use std::cmp::Ordering;

/// Records shown before the first "load more"
pub const PAGE_SIZE: usize = 40;

/// Records added by each "load more"
pub const PAGE_INCREMENT: usize = 20;

/// The inputs that decide which records pass and in what order
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub search: &'a str,
    pub category: &'a str,
    /// The "all categories" sentinel
    pub all_label: &'a str,
    pub sort: SortKey,
}

/// Output of the pipeline
#[derive(Debug, Clone)]
pub struct Visible<'a> {
    /// The first `display_count` records of the sorted filtered sequence
    pub records: Vec<&'a StyleRecord>,
    /// Size of the filtered sequence before pagination
    pub total: usize,
    pub has_more: bool,
}

impl Visible<'_> {
    /// Nothing matched the filters (distinct from "no more pages")
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Records hidden behind "load more"
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.records.len())
    }
}

/// Filter then stable-sort the records
pub fn filter_sorted<'a>(records: &'a [StyleRecord], query: &Query<'_>) -> Vec<&'a StyleRecord> {
    let needle = query.search.to_lowercase();
    let any_category = query.category == query.all_label;

    let mut filtered: Vec<&StyleRecord> = records
        .iter()
        .filter(|r| r.matches_search(&needle))
        .filter(|r| any_category || r.category == query.category)
        .collect();

    // sort_by is stable, equal keys keep dataset order
    filtered.sort_by(|a, b| compare_records(a, b, query.sort));
    filtered
}

/// Run the whole pipeline
pub fn compute_visible<'a>(
    records: &'a [StyleRecord],
    query: &Query<'_>,
    display_count: usize,
) -> Visible<'a> {
    let _span = tracing::debug_span!(
        "compute_visible",
        total_records = records.len(),
        search_len = query.search.len(),
        category = %query.category,
        sort = ?query.sort,
        display_count
    )
    .entered();

    let mut filtered = filter_sorted(records, query);
    let total = filtered.len();
    filtered.truncate(display_count);

    tracing::trace!(filtered = total, shown = filtered.len(), "visible set computed");

    Visible {
        records: filtered,
        total,
        has_more: total > display_count,
    }
}

/// Featured first, then new, then the chosen key
pub fn compare_records(a: &StyleRecord, b: &StyleRecord, sort: SortKey) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.new.cmp(&a.new))
        .then_with(|| match sort {
            SortKey::Name => collate(&a.name, &b.name),
            SortKey::Category => collate(&a.category, &b.category),
        })
}

/// Case-folded alphabetical comparison with a byte-order tiebreak so "apple"
/// and "Apple" still have a fixed order
fn collate(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    a_lower
        .chars()
        .map(letter_rank)
        .cmp(b_lower.chars().map(letter_rank))
        .then_with(|| a.cmp(b))
}

/// Polish letters sort right after their base letter (a < ą < b, z < ź < ż)
/// instead of after 'z' as their code points would
fn letter_rank(c: char) -> (char, u8) {
    match c {
        'ą' => ('a', 1),
        'ć' => ('c', 1),
        'ę' => ('e', 1),
        'ł' => ('l', 1),
        'ń' => ('n', 1),
        'ó' => ('o', 1),
        'ś' => ('s', 1),
        'ź' => ('z', 1),
        'ż' => ('z', 2),
        other => (other, 0),
    }
}
