//! UI enums - sort key and view mode

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Ordering applied after the featured/new priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Category,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name A-Z",
            SortKey::Category => "Category",
        }
    }

    /// The other sort key (there are only two)
    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Category,
            SortKey::Category => SortKey::Name,
        }
    }
}

/// How the result set is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "Grid",
            ViewMode::List => "List",
        }
    }

    pub fn toggled(&self) -> ViewMode {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}
