//! Catalog loading services

use crate::error::CatalogError;
use crate::model::catalog::{Catalog, RawCatalog};
use crate::model::style::Locale;
use std::fs;
use std::path::Path;

/// Sample catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../../data/styles.json");

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(CatalogFormat::Json),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse catalog text and resolve it to `locale`
pub fn parse_catalog(
    contents: &str,
    format: CatalogFormat,
    locale: Locale,
) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = match format {
        CatalogFormat::Json => serde_json::from_str(contents)?,
        CatalogFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Catalog::from_raw(&raw, locale)
}

/// Load a catalog file from disk
pub fn load_catalog<P: AsRef<Path>>(path: P, locale: Locale) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&contents, format, locale)?;
    tracing::info!(
        path = %path.display(),
        styles = catalog.len(),
        categories = catalog.categories().len(),
        locale = locale.code(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// The sample catalog shipped with the binary
pub fn bundled_catalog(locale: Locale) -> Result<Catalog, CatalogError> {
    let catalog = parse_catalog(BUNDLED_CATALOG, CatalogFormat::Json, locale)?;
    tracing::info!(styles = catalog.len(), locale = locale.code(), "bundled catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::browse::BrowseState;
    use crate::services::visible::{PAGE_INCREMENT, PAGE_SIZE};
    use std::io::Write;
    use std::path::PathBuf;

    const YAML: &str = r#"
categories:
  en: ["All styles", "Gothic", "Surreal"]
  pl: ["Wszystkie", "Gotyckie", "Surrealistyczne"]
styles:
  - id: 1
    name: { en: "Gothic Dreams", pl: "Gotyckie sny" }
    category: { en: "Gothic", pl: "Gotyckie" }
    tags: { en: ["dark"], pl: ["mroczne"] }
    example: { en: "a cathedral at night" }
    srefCode: "3199463349"
    featured: true
  - id: 2
    name: { en: "Melting Clocks" }
    category: { en: "Surreal", pl: "Surrealistyczne" }
    srefCode: "1234"
    new: true
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(&PathBuf::from("styles.JSON")).unwrap(),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(&PathBuf::from("a/b/styles.yml")).unwrap(),
            CatalogFormat::Yaml
        );
        assert!(matches!(
            CatalogFormat::from_path(&PathBuf::from("styles.csv")),
            Err(CatalogError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_yaml_catalog_in_polish() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let catalog = load_catalog(file.path(), Locale::Pl).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all_label(), "Wszystkie");
        assert_eq!(catalog.records()[0].name, "Gotyckie sny");
        assert_eq!(catalog.records()[1].name, "Melting Clocks");
        assert_eq!(catalog.category_count("Surrealistyczne"), 1);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = load_catalog(&path, Locale::En).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_catalog("{ \"styles\": [", CatalogFormat::Json, Locale::En).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_bundled_catalog_is_valid_in_every_locale() {
        for locale in [Locale::En, Locale::Pl] {
            let catalog = bundled_catalog(locale).unwrap();
            assert!(!catalog.is_empty());
            assert!(catalog.featured().is_some());
            for record in catalog.records() {
                assert!(
                    catalog.is_category(&record.category),
                    "{} has unknown category {}",
                    record.name,
                    record.category
                );
            }
        }
    }

    #[test]
    fn test_bundled_catalog_spans_more_than_one_page() {
        let catalog = bundled_catalog(Locale::En).unwrap();
        let mut browse = BrowseState::new(&catalog);

        let first = browse.visible(&catalog);
        assert_eq!(first.records.len(), PAGE_SIZE);
        assert!(first.has_more);

        assert!(browse.load_more(&catalog));
        let second = browse.visible(&catalog);
        assert_eq!(second.records.len(), catalog.len().min(PAGE_SIZE + PAGE_INCREMENT));
    }
}
