//! The loaded catalog: resolved records plus the category list

use super::style::{Locale, Localized, RawStyle, StyleRecord};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// On-disk catalog shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalog {
    /// Category labels per locale; the first entry is the "all" label
    pub categories: Localized<Vec<String>>,
    pub styles: Vec<RawStyle>,
}

/// Read-only dataset for one browsing session
#[derive(Debug, Clone)]
pub struct Catalog {
    pub locale: Locale,
    records: Vec<StyleRecord>,
    categories: Vec<String>,
}

impl Catalog {
    /// Build a catalog from already-resolved records.
    ///
    /// `categories[0]` is the "all categories" sentinel.
    pub fn new(
        locale: Locale,
        records: Vec<StyleRecord>,
        categories: Vec<String>,
    ) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
            if !categories[1..].contains(&record.category) {
                tracing::warn!(
                    id = record.id,
                    category = %record.category,
                    "style category is not in the category list"
                );
            }
        }

        Ok(Self {
            locale,
            records,
            categories,
        })
    }

    /// Resolve a raw multi-locale catalog to one locale
    pub fn from_raw(raw: &RawCatalog, locale: Locale) -> Result<Self, CatalogError> {
        let records = raw.styles.iter().map(|s| s.resolve(locale)).collect();
        let categories = raw.categories.get(locale).clone();
        Self::new(locale, records, categories)
    }

    /// All records in dataset order
    pub fn records(&self) -> &[StyleRecord] {
        &self.records
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The "all categories" sentinel label
    pub fn all_label(&self) -> &str {
        &self.categories[0]
    }

    pub fn is_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Number of records in a category; the sentinel counts everything
    pub fn category_count(&self, label: &str) -> usize {
        if label == self.all_label() {
            self.records.len()
        } else {
            self.records.iter().filter(|r| r.category == label).count()
        }
    }

    /// The record shown in the featured banner
    pub fn featured(&self) -> Option<&StyleRecord> {
        self.records.iter().find(|r| r.featured)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Record and catalog builders shared by tests across modules
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(id: u32, name: &str, category: &str) -> StyleRecord {
        StyleRecord {
            id,
            name: name.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
            example: String::new(),
            description: None,
            code: format!("{}", 1_000_000 + id),
            image: None,
            featured: false,
            new: false,
        }
    }

    pub fn catalog(records: Vec<StyleRecord>) -> Catalog {
        let mut categories = vec!["All".to_string()];
        for record in &records {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        Catalog::new(Locale::En, records, categories).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{catalog, record};
    use super::*;

    #[test]
    fn test_new_rejects_empty_categories() {
        let result = Catalog::new(Locale::En, vec![record(1, "a", "x")], vec![]);
        assert!(matches!(result, Err(CatalogError::NoCategories)));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(
            Locale::En,
            vec![record(1, "a", "x"), record(1, "b", "x")],
            vec!["All".into(), "x".into()],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_category_counts() {
        let catalog = catalog(vec![
            record(1, "a", "Gothic"),
            record(2, "b", "Surreal"),
            record(3, "c", "Gothic"),
        ]);

        assert_eq!(catalog.all_label(), "All");
        assert_eq!(catalog.category_count("All"), 3);
        assert_eq!(catalog.category_count("Gothic"), 2);
        assert_eq!(catalog.category_count("Surreal"), 1);
        assert_eq!(catalog.category_count("Anime"), 0);
        assert!(catalog.is_category("Surreal"));
        assert!(!catalog.is_category("Anime"));
    }

    #[test]
    fn test_featured_is_first_flagged_record() {
        let mut second = record(2, "b", "x");
        second.featured = true;
        let mut third = record(3, "c", "x");
        third.featured = true;
        let catalog = catalog(vec![record(1, "a", "x"), second, third]);

        assert_eq!(catalog.featured().map(|r| r.id), Some(2));
    }
}
