//! Style records: the raw multi-locale dataset shape and the resolved view

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Language key used to pick one of the parallel localized fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
        }
    }
}

/// A value with one entry per supported locale.
///
/// English is mandatory; other locales fall back to it when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Localized<T> {
    pub en: T,
    #[serde(default)]
    pub pl: Option<T>,
}

impl<T> Localized<T> {
    pub fn get(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Pl => self.pl.as_ref().unwrap_or(&self.en),
        }
    }
}

/// A style as stored in the catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStyle {
    pub id: u32,
    pub name: Localized<String>,
    pub category: Localized<String>,
    #[serde(default)]
    pub tags: Localized<Vec<String>>,
    #[serde(default)]
    pub example: Localized<String>,
    #[serde(default)]
    pub description: Option<Localized<String>>,
    pub sref_code: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub new: bool,
}

impl RawStyle {
    /// Collapse the localized fields to a single locale
    pub fn resolve(&self, locale: Locale) -> StyleRecord {
        StyleRecord {
            id: self.id,
            name: self.name.get(locale).clone(),
            category: self.category.get(locale).clone(),
            tags: self.tags.get(locale).clone(),
            example: self.example.get(locale).clone(),
            description: self.description.as_ref().map(|d| d.get(locale).clone()),
            code: self.sref_code.clone(),
            image: self.image_url.clone(),
            featured: self.featured,
            new: self.new,
        }
    }
}

/// A style resolved to one locale. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRecord {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub tags: Vec<String>,
    pub example: String,
    pub description: Option<String>,
    /// The copyable sref code
    pub code: String,
    pub image: Option<String>,
    pub featured: bool,
    pub new: bool,
}

impl StyleRecord {
    /// Case-insensitive substring match against name, tags, and code.
    ///
    /// `needle` must already be lowercased. An empty needle matches.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.code.to_lowercase().contains(needle)
    }

    /// Badge shown next to the name in lists and cards
    pub fn badge(&self) -> Option<&'static str> {
        if self.featured {
            Some("★ Featured")
        } else if self.new {
            Some("NEW")
        } else {
            None
        }
    }

    /// Image reference with the same placeholder the web catalog used
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or("/placeholder.svg")
    }
}
