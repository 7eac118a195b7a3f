//! Model layer - catalog data and browse state
//!
//! - `Catalog` / `StyleRecord` - the read-only dataset, resolved to one locale
//! - `BrowseState` - the session's search, category, sort, view, page and copy state
//! - `ModalStack` - modal overlay management

pub mod browse;
pub mod catalog;
pub mod modal;
pub mod style;
pub mod ui;

pub use browse::BrowseState;
pub use style::Locale;
