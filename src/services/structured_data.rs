//! schema.org structured data for the catalog
//!
//! Produces the `ItemList` JSON-LD document search engines read: the catalog
//! size plus the first ten records as `CreativeWork` items.

use crate::model::catalog::Catalog;
use serde_json::{json, Value};

/// Records listed in the document
const LISTED_ITEMS: usize = 10;

/// Build the JSON-LD `ItemList` for a catalog
pub fn item_list(catalog: &Catalog) -> Value {
    let items: Vec<Value> = catalog
        .records()
        .iter()
        .take(LISTED_ITEMS)
        .enumerate()
        .map(|(index, style)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": {
                    "@type": "CreativeWork",
                    "name": style.name,
                    "description": style.example,
                    "category": style.category,
                    "keywords": style.tags.join(", "),
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": "Sref Styles for Midjourney",
        "description": "Collection of reference styles for Midjourney image generator",
        "numberOfItems": catalog.len(),
        "itemListElement": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::{catalog, record};

    #[test]
    fn test_item_list_caps_items_and_counts_everything() {
        let records = (1..=12)
            .map(|i| {
                let mut r = record(i, &format!("style {}", i), "Gothic");
                r.tags = vec!["dark".into(), "moody".into()];
                r.example = format!("example {}", i);
                r
            })
            .collect();
        let doc = item_list(&catalog(records));

        assert_eq!(doc["@type"], "ItemList");
        assert_eq!(doc["numberOfItems"], 12);

        let items = doc["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[0]["item"]["name"], "style 1");
        assert_eq!(items[0]["item"]["description"], "example 1");
        assert_eq!(items[0]["item"]["keywords"], "dark, moody");
        assert_eq!(items[9]["position"], 10);
    }
}
