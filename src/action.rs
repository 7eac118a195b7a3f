//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to the
//! browse state and the modal stack.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain clipboard outcomes, expire copy feedback
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the cursor to the next record
    NextItem,
    /// Move the cursor to the previous record
    PrevItem,
    /// Move one grid row down (one record in list view)
    NextRow,
    /// Move one grid row up
    PrevRow,
    /// Jump to the last visible record
    LastItem,
    /// Back to the first record
    ScrollToTop,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenCategoryPicker,
    /// Open the detail dialog for the record under the cursor
    OpenStyleDetail,
    OpenHelp,
    CloseModal,
    ModalUp,
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    /// Replace the search term with a tag
    SearchTag(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Filters
    // ─────────────────────────────────────────────────────────────────────────
    SetCategory(String),
    /// Filter by the category of the record under the cursor
    SelectRecordCategory,
    NextCategory,
    PrevCategory,
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Sort, View & Paging
    // ─────────────────────────────────────────────────────────────────────────
    CycleSort,
    ToggleViewMode,
    LoadMore,

    // ─────────────────────────────────────────────────────────────────────────
    // Clipboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Copy the code of the record under the cursor
    CopySelected,
    /// Copy the featured style's code
    CopyFeatured,
    /// Copy a specific code (detail dialog)
    CopyCode(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ScrollToTop => write!(f, "ScrollToTop"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenCategoryPicker => write!(f, "OpenCategoryPicker"),
            Action::OpenStyleDetail => write!(f, "OpenStyleDetail"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::SearchTag(tag) => write!(f, "SearchTag({})", tag),
            Action::SetCategory(category) => write!(f, "SetCategory({})", category),
            Action::SelectRecordCategory => write!(f, "SelectRecordCategory"),
            Action::NextCategory => write!(f, "NextCategory"),
            Action::PrevCategory => write!(f, "PrevCategory"),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::CycleSort => write!(f, "CycleSort"),
            Action::ToggleViewMode => write!(f, "ToggleViewMode"),
            Action::LoadMore => write!(f, "LoadMore"),
            Action::CopySelected => write!(f, "CopySelected"),
            Action::CopyFeatured => write!(f, "CopyFeatured"),
            Action::CopyCode(code) => write!(f, "CopyCode({})", code),
        }
    }
}
