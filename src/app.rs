//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. It owns
//! the catalog, the browse state and the clipboard worker handle.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, CategoryDialog, HelpDialog, HomeComponent, HomeRenderContext, QuitDialog,
    StyleDialog,
};
use crate::model::browse::BrowseState;
use crate::model::catalog::Catalog;
use crate::model::modal::{Modal, ModalStack};
use crate::model::style::StyleRecord;
use crate::services::clipboard::ClipboardService;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Read-only dataset for this session
    pub catalog: Catalog,

    /// Search, category, sort, view, page and copy state
    pub browse: BrowseState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Clipboard worker handle
    pub clipboard: ClipboardService,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub quit_dialog: QuitDialog,
    pub category_dialog: CategoryDialog,
    pub style_dialog: StyleDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(catalog: Catalog, browse: BrowseState, clipboard: ClipboardService) -> App {
        App {
            catalog,
            browse,
            modals: ModalStack::new(),
            clipboard,
            should_quit: false,
            status_message: None,
            home: HomeComponent::new(),
            quit_dialog: QuitDialog,
            category_dialog: CategoryDialog::new(),
            style_dialog: StyleDialog::default(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn visible_len(&self) -> usize {
        self.browse.visible(&self.catalog).records.len()
    }

    /// The record under the cursor
    pub fn selected_style(&self) -> Option<&StyleRecord> {
        let visible = self.browse.visible(&self.catalog);
        self.home.selected(&visible)
    }

    fn style_by_id(&self, id: u32) -> Option<&StyleRecord> {
        self.catalog.records().iter().find(|r| r.id == id)
    }

    /// Filters changed: the old cursor position means nothing any more
    fn after_filter_change(&mut self) {
        self.home.scroll_to_top();
        self.status_message = None;
    }

    /// Failed copies are only logged; the user sees no "copied" feedback
    fn copy(&mut self, code: &str) {
        let _ = self.browse.request_copy(&self.clipboard, code);
    }

    /// Apply finished clipboard writes and expire old feedback
    pub fn poll_clipboard(&mut self, now: Instant) {
        for outcome in self.clipboard.poll() {
            self.browse.apply_copy_outcome(outcome, now);
        }
        self.browse.expire_copy_feedback(now);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.home.search_mode {
            self.handle_search_key_event(key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::trace!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.poll_clipboard(Instant::now()),
            Action::Resize(_, _) => {}
            Action::ForceQuit => self.should_quit = true,

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => {
                let len = self.visible_len();
                self.home.next(len);
            }
            Action::PrevItem => self.home.previous(),
            Action::NextRow => {
                let len = self.visible_len();
                self.home.next_row(len, self.browse.view_mode());
            }
            Action::PrevRow => self.home.previous_row(self.browse.view_mode()),
            Action::LastItem => {
                let len = self.visible_len();
                self.home.select_last(len);
            }
            Action::ScrollToTop => self.home.scroll_to_top(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenCategoryPicker => {
                self.category_dialog
                    .set_categories(&self.catalog, self.browse.selected_category());
                self.modals.push(Modal::CategoryPicker {
                    selected_index: self.category_dialog.selected_index,
                });
            }
            Action::OpenStyleDetail => {
                if let Some(style) = self.selected_style().cloned() {
                    self.style_dialog.set_style(&style);
                    self.modals.push(Modal::StyleDetail { style_id: style.id });
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {
                if let Some(Modal::CategoryPicker { selected_index }) = self.modals.top_mut() {
                    *selected_index = self.category_dialog.selected_index;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => {
                self.browse.push_search_char(c);
                self.after_filter_change();
            }
            Action::SearchBackspace => {
                self.browse.pop_search_char();
                self.after_filter_change();
            }
            Action::SearchTag(tag) => {
                self.browse.set_search(tag);
                self.after_filter_change();
                if matches!(self.modals.top(), Some(Modal::StyleDetail { .. })) {
                    self.modals.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters
            // ─────────────────────────────────────────────────────────────────
            Action::SetCategory(category) => {
                match self.browse.set_category(&self.catalog, &category) {
                    Ok(()) => self.after_filter_change(),
                    Err(e) => self.status_message = Some(e.to_string()),
                }
                if matches!(
                    self.modals.top(),
                    Some(Modal::CategoryPicker { .. } | Modal::StyleDetail { .. })
                ) {
                    self.modals.pop();
                }
            }
            Action::SelectRecordCategory => {
                let category = self.selected_style().map(|s| s.category.clone());
                return Ok(category.map(Action::SetCategory));
            }
            Action::NextCategory => {
                self.browse.cycle_category(&self.catalog, true);
                self.after_filter_change();
            }
            Action::PrevCategory => {
                self.browse.cycle_category(&self.catalog, false);
                self.after_filter_change();
            }
            Action::ClearFilters => {
                self.browse.clear_filters(&self.catalog);
                self.after_filter_change();
            }

            // ─────────────────────────────────────────────────────────────────
            // Sort, View & Paging
            // ─────────────────────────────────────────────────────────────────
            Action::CycleSort => {
                self.browse.set_sort(self.browse.sort_key().next());
                self.after_filter_change();
            }
            Action::ToggleViewMode => {
                self.browse.set_view_mode(self.browse.view_mode().toggled());
            }
            Action::LoadMore => {
                self.browse.load_more(&self.catalog);
            }

            // ─────────────────────────────────────────────────────────────────
            // Clipboard
            // ─────────────────────────────────────────────────────────────────
            Action::CopySelected => {
                let code = self.selected_style().map(|s| s.code.clone());
                return Ok(code.map(Action::CopyCode));
            }
            Action::CopyFeatured => {
                let code = self.catalog.featured().map(|s| s.code.clone());
                return Ok(code.map(Action::CopyCode));
            }
            Action::CopyCode(code) => self.copy(&code),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            catalog: &self.catalog,
            browse: &self.browse,
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::CategoryPicker { .. } => self.category_dialog.handle_key_event(key),
            Modal::StyleDetail { .. } => self.style_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::CategoryPicker { .. } => self.category_dialog.draw(frame, area)?,
            Modal::StyleDetail { style_id } => {
                if let Some(style) = self.style_by_id(*style_id).cloned() {
                    self.style_dialog
                        .draw_with_style(frame, area, &style, &self.browse)?;
                }
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::browse::COPY_FEEDBACK;
    use crate::model::catalog::fixtures::{catalog, record};
    use crate::services::clipboard::fake::FakeClipboard;
    use std::time::Duration;

    fn app() -> App {
        let mut featured = record(1, "Gothic Dreams", "Gothic");
        featured.featured = true;
        featured.code = "3199463349".into();
        featured.tags = vec!["dark".into(), "cathedral".into()];
        let mut surreal = record(2, "Melting Clocks", "Surreal");
        surreal.tags = vec!["dreamlike".into()];
        let catalog = catalog(vec![featured, surreal, record(3, "Fog Harbor", "Photo")]);
        let browse = BrowseState::new(&catalog);
        App::new(catalog, browse, ClipboardService::spawn(FakeClipboard::default))
    }

    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            run(app, action);
        }
    }

    /// Poll until the clipboard worker has answered
    fn settle(app: &mut App) {
        for _ in 0..200 {
            app.poll_clipboard(Instant::now());
            if app.browse.copied_code().is_some() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_typing_in_search_mode_filters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.home.search_mode);

        for c in "fog".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(!app.home.search_mode);
        assert_eq!(app.browse.search_term(), "fog");
        assert_eq!(app.selected_style().map(|s| s.id), Some(3));
    }

    #[test]
    fn test_record_category_shortcut_follows_up_with_set_category() {
        let mut app = app();
        run(&mut app, Action::NextItem);
        assert_eq!(app.selected_style().map(|s| s.id), Some(3));

        let follow_up = app.update(Action::SelectRecordCategory).unwrap();
        assert_eq!(follow_up, Some(Action::SetCategory("Photo".into())));

        run(&mut app, Action::SelectRecordCategory);
        assert_eq!(app.browse.selected_category(), "Photo");
        assert_eq!(app.browse.visible(&app.catalog).total, 1);
        assert_eq!(app.home.cursor, 0);
    }

    #[test]
    fn test_category_picker_round_trip() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert!(matches!(app.modals.top(), Some(Modal::CategoryPicker { .. })));

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(
            app.modals.top(),
            Some(&Modal::CategoryPicker { selected_index: 1 })
        );

        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.browse.selected_category(), "Gothic");
    }

    #[test]
    fn test_unknown_category_is_reported_not_applied() {
        let mut app = app();
        run(&mut app, Action::SetCategory("Baroque".into()));
        assert_eq!(app.browse.selected_category(), "All");
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_detail_dialog_tag_shortcut_searches_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.modals.top(), Some(&Modal::StyleDetail { style_id: 1 }));

        press(&mut app, KeyCode::Char('2'));
        assert!(app.modals.is_empty());
        assert_eq!(app.browse.search_term(), "cathedral");
    }

    #[test]
    fn test_copy_selected_shows_feedback_then_expires() {
        let mut app = app();
        press(&mut app, KeyCode::Char('y'));
        settle(&mut app);

        assert_eq!(app.browse.copied_code(), Some("3199463349"));

        app.poll_clipboard(Instant::now() + COPY_FEEDBACK);
        assert_eq!(app.browse.copied_code(), None);
    }

    #[test]
    fn test_failed_copy_only_withholds_feedback() {
        let mut featured = record(1, "a", "Gothic");
        featured.featured = true;
        let catalog = catalog(vec![featured]);
        let browse = BrowseState::new(&catalog);
        let clipboard = ClipboardService::spawn(|| FakeClipboard {
            fail: true,
            ..Default::default()
        });
        let mut app = App::new(catalog, browse, clipboard);

        run(&mut app, Action::CopyFeatured);
        let outcome = app
            .clipboard
            .recv_timeout(Duration::from_secs(2))
            .expect("worker answers");
        assert!(outcome.result.is_err());
        assert!(!app.browse.apply_copy_outcome(outcome, Instant::now()));

        app.poll_clipboard(Instant::now());
        assert_eq!(app.browse.copied_code(), None);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }
}
