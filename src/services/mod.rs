//! Services outside the UI
//!
//! - Catalog loading (JSON / YAML / bundled)
//! - The filter-sort-paginate pipeline
//! - Clipboard writes on a worker thread
//! - JSON-LD export

pub mod catalog;
pub mod clipboard;
pub mod structured_data;
pub mod visible;

pub use catalog::{bundled_catalog, load_catalog};
pub use clipboard::{ClipboardService, SystemClipboard};
