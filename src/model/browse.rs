//! Browse state - the single owned UI state for a session and its commands

use super::catalog::Catalog;
use super::ui::{SortKey, ViewMode};
use crate::error::{ClipboardError, StateError};
use crate::services::clipboard::{ClipboardService, CopyOutcome, CopyRequest};
use crate::services::visible::{self, Query, Visible, PAGE_INCREMENT, PAGE_SIZE};
use std::time::{Duration, Instant};

/// How long the "copied" feedback stays visible
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Feedback for the most recent successful copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedCode {
    pub code: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    search_term: String,
    selected_category: String,
    sort_key: SortKey,
    view_mode: ViewMode,
    display_count: usize,
    /// Id of the newest copy request; older resolutions are ignored
    latest_copy: u64,
    copied: Option<CopiedCode>,
}

impl BrowseState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            search_term: String::new(),
            selected_category: catalog.all_label().to_string(),
            sort_key: SortKey::default(),
            view_mode: ViewMode::default(),
            display_count: PAGE_SIZE,
            latest_copy: 0,
            copied: None,
        }
    }

    /// Start from configured sort and view instead of the defaults
    pub fn with_preferences(mut self, sort: SortKey, view: ViewMode) -> Self {
        self.sort_key = sort;
        self.view_mode = view;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn copied_code(&self) -> Option<&str> {
        self.copied.as_ref().map(|c| c.code.as_str())
    }

    pub fn is_copied(&self, code: &str) -> bool {
        self.copied_code() == Some(code)
    }

    /// Search or category narrows the result set
    pub fn has_active_filters(&self, catalog: &Catalog) -> bool {
        !self.search_term.is_empty() || self.selected_category != catalog.all_label()
    }

    pub fn query<'a>(&'a self, catalog: &'a Catalog) -> Query<'a> {
        Query {
            search: &self.search_term,
            category: &self.selected_category,
            all_label: catalog.all_label(),
            sort: self.sort_key,
        }
    }

    pub fn visible<'a>(&'a self, catalog: &'a Catalog) -> Visible<'a> {
        visible::compute_visible(catalog.records(), &self.query(catalog), self.display_count)
    }

    pub fn filtered_count(&self, catalog: &Catalog) -> usize {
        visible::filter_sorted(catalog.records(), &self.query(catalog)).len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Commands
    // ═══════════════════════════════════════════════════════════════════════

    // ─── Search ──────────────────────────────────────────────────────────────

    /// Replace the search term verbatim (no trimming)
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
        tracing::debug!(search = %self.search_term, "search changed");
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
        tracing::debug!(search = %self.search_term, "search changed");
    }

    pub fn pop_search_char(&mut self) {
        if self.search_term.pop().is_some() {
            tracing::debug!(search = %self.search_term, "search changed");
        }
    }

    // ─── Category ────────────────────────────────────────────────────────────

    /// Select a category; it must be one of the catalog's labels
    pub fn set_category(&mut self, catalog: &Catalog, category: &str) -> Result<(), StateError> {
        if !catalog.is_category(category) {
            let err = StateError::InvalidTransition {
                command: "set_category",
                value: category.to_string(),
                reason: "not a catalog category",
            };
            tracing::warn!(error = %err, "rejected state transition");
            return Err(err);
        }
        self.selected_category = category.to_string();
        tracing::debug!(category, "category changed");
        Ok(())
    }

    /// Move to the next (or previous) category in list order, wrapping around
    pub fn cycle_category(&mut self, catalog: &Catalog, forward: bool) {
        let categories = catalog.categories();
        let current = categories
            .iter()
            .position(|c| *c == self.selected_category)
            .unwrap_or(0);
        let len = categories.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.selected_category = categories[next].clone();
        tracing::debug!(category = %self.selected_category, "category changed");
    }

    // ─── Sort / view ─────────────────────────────────────────────────────────

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
        tracing::debug!(sort = ?key, "sort changed");
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        tracing::debug!(view = ?mode, "view mode changed");
    }

    // ─── Pagination ──────────────────────────────────────────────────────────

    /// Show up to `PAGE_INCREMENT` more records, never more than the filtered
    /// count. A count left above it by a narrower filter drops back down.
    /// Returns false when the count was already exactly the filtered count.
    pub fn load_more(&mut self, catalog: &Catalog) -> bool {
        let filtered = self.filtered_count(catalog);
        if self.display_count == filtered {
            return false;
        }
        self.display_count = (self.display_count + PAGE_INCREMENT).min(filtered);
        tracing::debug!(display_count = self.display_count, filtered, "loaded more");
        true
    }

    /// Reset search and category. Sort, view and page size are kept.
    pub fn clear_filters(&mut self, catalog: &Catalog) {
        self.search_term.clear();
        self.selected_category = catalog.all_label().to_string();
        tracing::debug!("filters cleared");
    }

    // ─── Copy ────────────────────────────────────────────────────────────────

    /// Hand `code` to the clipboard worker. The returned id identifies the
    /// outcome that will later arrive through `apply_copy_outcome`.
    pub fn request_copy(
        &mut self,
        clipboard: &ClipboardService,
        code: &str,
    ) -> Result<u64, ClipboardError> {
        self.latest_copy += 1;
        let id = self.latest_copy;
        let request = CopyRequest {
            id,
            code: code.to_string(),
        };

        if let Err(e) = clipboard.submit(request) {
            tracing::warn!(error = %e, code, "copy request not delivered");
            return Err(e);
        }
        tracing::debug!(id, code, "copy requested");
        Ok(id)
    }

    /// Apply a resolved copy. Only the newest request may change feedback.
    /// Returns true when the feedback changed.
    pub fn apply_copy_outcome(&mut self, outcome: CopyOutcome, now: Instant) -> bool {
        if outcome.id != self.latest_copy {
            tracing::debug!(
                id = outcome.id,
                latest = self.latest_copy,
                "ignoring superseded copy outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(()) => {
                tracing::debug!(id = outcome.id, code = %outcome.code, "copied");
                self.copied = Some(CopiedCode {
                    code: outcome.code,
                    expires_at: now + COPY_FEEDBACK,
                });
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, code = %outcome.code, "failed to copy");
                false
            }
        }
    }

    /// Clear the feedback once its deadline has passed. Returns true when
    /// something was cleared.
    pub fn expire_copy_feedback(&mut self, now: Instant) -> bool {
        match &self.copied {
            Some(copied) if now >= copied.expires_at => {
                tracing::debug!(code = %copied.code, "copy feedback expired");
                self.copied = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::{catalog, record};
    use crate::services::clipboard::fake::FakeClipboard;

    fn outcome(id: u64, code: &str) -> CopyOutcome {
        CopyOutcome {
            id,
            code: code.to_string(),
            result: Ok(()),
        }
    }

    fn forty_five() -> Catalog {
        catalog(
            (0..45)
                .map(|i| record(i, &format!("style {:02}", i), "A"))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let state = BrowseState::new(&catalog);

        assert_eq!(state.search_term(), "");
        assert_eq!(state.selected_category(), "All");
        assert_eq!(state.sort_key(), SortKey::Name);
        assert_eq!(state.view_mode(), ViewMode::Grid);
        assert_eq!(state.display_count, 40);
        assert_eq!(state.copied_code(), None);
        assert!(!state.has_active_filters(&catalog));
    }

    #[test]
    fn test_search_is_stored_verbatim() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);

        state.set_search("  Gothic ");
        assert_eq!(state.search_term(), "  Gothic ");

        state.pop_search_char();
        state.push_search_char('!');
        assert_eq!(state.search_term(), "  Gothic!");
        assert!(state.has_active_filters(&catalog));
    }

    #[test]
    fn test_set_category_rejects_unknown_label() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);

        assert!(state.set_category(&catalog, "Gothic").is_ok());
        assert_eq!(state.selected_category(), "Gothic");

        let err = state.set_category(&catalog, "Baroque").unwrap_err();
        assert!(matches!(err, StateError::InvalidTransition { .. }));
        assert_eq!(state.selected_category(), "Gothic");
    }

    #[test]
    fn test_cycle_category_wraps() {
        let catalog = catalog(vec![record(1, "a", "Gothic"), record(2, "b", "Surreal")]);
        let mut state = BrowseState::new(&catalog);

        state.cycle_category(&catalog, true);
        assert_eq!(state.selected_category(), "Gothic");
        state.cycle_category(&catalog, true);
        state.cycle_category(&catalog, true);
        assert_eq!(state.selected_category(), "All");
        state.cycle_category(&catalog, false);
        assert_eq!(state.selected_category(), "Surreal");
    }

    #[test]
    fn test_load_more_steps_to_filtered_count_and_stops() {
        let catalog = forty_five();
        let mut state = BrowseState::new(&catalog);

        let visible = state.visible(&catalog);
        assert_eq!(visible.records.len(), 40);
        assert_eq!(visible.records[0].name, "style 00");
        assert!(visible.has_more);

        assert!(state.load_more(&catalog));
        assert_eq!(state.display_count, 45);
        assert!(!state.visible(&catalog).has_more);

        assert!(!state.load_more(&catalog));
        assert_eq!(state.display_count, 45);
    }

    #[test]
    fn test_load_more_shrinks_count_to_narrower_filter() {
        let catalog = forty_five();
        let mut state = BrowseState::new(&catalog);
        state.set_search("style 0");
        assert_eq!(state.filtered_count(&catalog), 10);

        assert!(state.load_more(&catalog));
        assert_eq!(state.display_count, 10);

        // Already exactly at the filtered count
        assert!(!state.load_more(&catalog));
        assert_eq!(state.display_count, 10);
    }

    #[test]
    fn test_display_count_survives_filter_changes() {
        let catalog = forty_five();
        let mut state = BrowseState::new(&catalog);
        state.load_more(&catalog);

        state.set_search("style 1");
        state.clear_filters(&catalog);
        assert_eq!(state.display_count, 45);
    }

    #[test]
    fn test_clear_filters_restores_full_default_sorted_dataset() {
        let mut featured = record(3, "zeta", "Surreal");
        featured.featured = true;
        let catalog = catalog(vec![record(1, "beta", "Gothic"), record(2, "alpha", "Gothic"), featured]);
        let mut state = BrowseState::new(&catalog);
        let before: Vec<u32> = state.visible(&catalog).records.iter().map(|r| r.id).collect();

        state.set_search("alp");
        state.set_category(&catalog, "Gothic").unwrap();
        state.set_view_mode(ViewMode::List);
        assert_eq!(state.visible(&catalog).records.len(), 1);

        state.clear_filters(&catalog);
        let after: Vec<u32> = state.visible(&catalog).records.iter().map(|r| r.id).collect();
        assert_eq!(after, before);
        assert_eq!(after, vec![3, 2, 1]);
        // View mode is not a filter
        assert_eq!(state.view_mode(), ViewMode::List);
    }

    #[test]
    fn test_copy_feedback_lasts_two_seconds() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);
        let fake = FakeClipboard::default();
        let written = fake.written.clone();
        let service = ClipboardService::spawn(move || fake);

        let id = state.request_copy(&service, "3199463349").unwrap();
        let resolved = service.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(resolved.id, id);

        let t0 = Instant::now();
        assert!(state.apply_copy_outcome(resolved, t0));
        assert_eq!(state.copied_code(), Some("3199463349"));
        assert_eq!(*written.lock().unwrap(), vec!["3199463349".to_string()]);

        assert!(!state.expire_copy_feedback(t0 + Duration::from_millis(1999)));
        assert!(state.is_copied("3199463349"));

        assert!(state.expire_copy_feedback(t0 + COPY_FEEDBACK));
        assert_eq!(state.copied_code(), None);
    }

    #[test]
    fn test_failed_copy_leaves_feedback_unchanged() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);
        let service = ClipboardService::spawn(|| FakeClipboard {
            fail: true,
            ..Default::default()
        });

        state.request_copy(&service, "111").unwrap();
        let resolved = service.recv_timeout(Duration::from_secs(5)).unwrap();

        assert!(!state.apply_copy_outcome(resolved, Instant::now()));
        assert_eq!(state.copied_code(), None);
    }

    #[test]
    fn test_superseded_outcome_is_ignored() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);
        let service = ClipboardService::spawn(FakeClipboard::default);

        let first = state.request_copy(&service, "111").unwrap();
        let second = state.request_copy(&service, "222").unwrap();
        assert!(second > first);

        let t0 = Instant::now();
        assert!(!state.apply_copy_outcome(outcome(first, "111"), t0));
        assert_eq!(state.copied_code(), None);

        assert!(state.apply_copy_outcome(outcome(second, "222"), t0));
        assert_eq!(state.copied_code(), Some("222"));
    }

    #[test]
    fn test_new_copy_extends_deadline() {
        let catalog = catalog(vec![record(1, "a", "Gothic")]);
        let mut state = BrowseState::new(&catalog);
        let service = ClipboardService::spawn(FakeClipboard::default);
        let t0 = Instant::now();

        let first = state.request_copy(&service, "111").unwrap();
        state.apply_copy_outcome(outcome(first, "111"), t0);

        let t1 = t0 + Duration::from_millis(1500);
        let second = state.request_copy(&service, "222").unwrap();
        state.apply_copy_outcome(outcome(second, "222"), t1);

        // The first copy's deadline has passed but must not clear the second
        assert!(!state.expire_copy_feedback(t0 + COPY_FEEDBACK));
        assert_eq!(state.copied_code(), Some("222"));
        assert!(state.expire_copy_feedback(t1 + COPY_FEEDBACK));
    }
}
