//! Error types for catalog loading, clipboard access, and state commands.
//!
//! Application plumbing (terminal setup, the event loop, component hooks)
//! stays on `anyhow::Result`. The enums here cover the domain failures that
//! callers need to tell apart.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate a style catalog.
///
/// This is the only error class that stops the program: without a catalog
/// there is nothing to browse.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON for the catalog shape.
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file is not valid YAML for the catalog shape.
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported catalog format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// The category list is empty, so there is no "all categories" sentinel.
    #[error("catalog has no categories; the first category must be the \"all\" label")]
    NoCategories,

    /// Two records share the same id.
    #[error("duplicate style id {0}")]
    DuplicateId(u32),
}

/// Failure to place text on the system clipboard.
///
/// Recovered locally: the copy feedback is simply not shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, no display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard opened but rejected the text.
    #[error("clipboard write failed: {0}")]
    Write(String),

    /// The clipboard worker thread is gone.
    #[error("clipboard worker disconnected")]
    Disconnected,
}

/// A browse command was invoked with a value outside its allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{command} rejected {value:?}: {reason}")]
    InvalidTransition {
        command: &'static str,
        value: String,
        reason: &'static str,
    },
}
