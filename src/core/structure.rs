//! Navigation structure produced by the generation service.
//!
//! The field names mirror the service's JSON contract (`siteTitle`,
//! `navigation[].categoryName`, `items[].fileName`). Every field is required
//! on deserialization; the arrays may be empty.

use serde::{Deserialize, Serialize};

/// A single sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    /// Name of the document this entry points at.
    ///
    /// Produced by an external process: expected to equal some
    /// `Document::name`, but casing or surrounding whitespace may drift.
    #[serde(rename = "fileName")]
    pub file_reference: String,
}

/// A titled group of entries, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCategory {
    pub category_name: String,
    pub items: Vec<NavigationItem>,
}

/// Root aggregate of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStructure {
    pub site_title: String,
    pub site_description: String,
    pub navigation: Vec<NavigationCategory>,
}

impl SiteStructure {
    /// All items paired with their category, in navigation order.
    pub fn items(&self) -> impl Iterator<Item = (&NavigationCategory, &NavigationItem)> {
        self.navigation
            .iter()
            .flat_map(|cat| cat.items.iter().map(move |item| (cat, item)))
    }

    pub fn item_count(&self) -> usize {
        self.navigation.iter().map(|cat| cat.items.len()).sum()
    }

    /// Replace title/description with non-empty overrides.
    pub fn with_overrides(mut self, title: &str, description: &str) -> Self {
        if !title.is_empty() {
            self.site_title = title.to_string();
        }
        if !description.is_empty() {
            self.site_description = description.to_string();
        }
        self
    }
}

#[cfg(test)]
pub(crate) fn test_structure(navigation: &[(&str, &[(&str, &str)])]) -> SiteStructure {
    SiteStructure {
        site_title: "Test Docs".into(),
        site_description: "Docs for tests".into(),
        navigation: navigation
            .iter()
            .map(|(name, items)| NavigationCategory {
                category_name: (*name).into(),
                items: items
                    .iter()
                    .map(|(title, file)| NavigationItem {
                        title: (*title).into(),
                        file_reference: (*file).into(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_contract_names() {
        let json = r#"{
            "siteTitle": "Acme",
            "siteDescription": "Acme docs",
            "navigation": [
                { "categoryName": "Welcome", "items": [ { "title": "Home", "fileName": "index.md" } ] }
            ]
        }"#;
        let structure: SiteStructure = serde_json::from_str(json).unwrap();
        assert_eq!(structure.site_title, "Acme");
        assert_eq!(structure.navigation[0].category_name, "Welcome");
        assert_eq!(structure.navigation[0].items[0].file_reference, "index.md");
    }

    #[test]
    fn test_missing_field_rejected() {
        let json = r#"{ "siteTitle": "Acme", "navigation": [] }"#;
        assert!(serde_json::from_str::<SiteStructure>(json).is_err());

        let json = r#"{ "siteTitle": "A", "siteDescription": "B",
            "navigation": [ { "categoryName": "C", "items": [ { "title": "T" } ] } ] }"#;
        assert!(serde_json::from_str::<SiteStructure>(json).is_err());
    }

    #[test]
    fn test_items_in_navigation_order() {
        let structure = test_structure(&[
            ("Welcome", &[("Home", "index.md")]),
            ("Docs", &[("Guide", "guide.md"), ("API", "api.md")]),
        ]);
        let titles: Vec<_> = structure.items().map(|(_, item)| item.title.as_str()).collect();
        assert_eq!(titles, ["Home", "Guide", "API"]);
        assert_eq!(structure.item_count(), 3);
    }

    #[test]
    fn test_with_overrides() {
        let structure = test_structure(&[]);
        let kept = structure.clone().with_overrides("", "");
        assert_eq!(kept.site_title, "Test Docs");

        let replaced = structure.with_overrides("Handbook", "");
        assert_eq!(replaced.site_title, "Handbook");
        assert_eq!(replaced.site_description, "Docs for tests");
    }
}
