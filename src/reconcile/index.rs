//! Derived navigation views: title lookup, search filter, default selection.

use crate::core::{NavigationCategory, NavigationItem, SiteStructure};
use rustc_hash::FxHashMap;

/// Title and category of a reference, from its first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleEntry<'a> {
    pub title: &'a str,
    pub category: &'a str,
}

/// Flattened `reference -> {title, category}` lookup.
///
/// A reference listed in several categories keeps the entry of its first
/// occurrence in navigation order.
#[derive(Debug, Default)]
pub struct TitleIndex<'a> {
    entries: FxHashMap<&'a str, TitleEntry<'a>>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(structure: &'a SiteStructure) -> Self {
        let mut entries = FxHashMap::default();
        for (category, item) in structure.items() {
            entries
                .entry(item.file_reference.as_str())
                .or_insert(TitleEntry {
                    title: item.title.as_str(),
                    category: category.category_name.as_str(),
                });
        }
        Self { entries }
    }

    pub fn get(&self, reference: &str) -> Option<TitleEntry<'a>> {
        self.entries.get(reference).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A category restricted to the items matching a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCategory<'a> {
    pub category_name: &'a str,
    pub items: Vec<&'a NavigationItem>,
}

impl<'a> From<&'a NavigationCategory> for FilteredCategory<'a> {
    fn from(category: &'a NavigationCategory) -> Self {
        Self {
            category_name: &category.category_name,
            items: category.items.iter().collect(),
        }
    }
}

/// Navigation restricted to items whose title contains `term`
/// (case-insensitive). Categories left without items are omitted.
///
/// The empty term returns every category unchanged, including categories
/// that were empty to begin with.
pub fn filtered_navigation<'a>(structure: &'a SiteStructure, term: &str) -> Vec<FilteredCategory<'a>> {
    if term.is_empty() {
        return structure.navigation.iter().map(FilteredCategory::from).collect();
    }

    let needle = term.to_lowercase();
    structure
        .navigation
        .iter()
        .filter_map(|category| {
            let items: Vec<_> = category
                .items
                .iter()
                .filter(|item| item.title.to_lowercase().contains(&needle))
                .collect();
            (!items.is_empty()).then(|| FilteredCategory {
                category_name: &category.category_name,
                items,
            })
        })
        .collect()
}

/// First item of the first non-empty category, in unfiltered order.
pub fn default_selection(structure: &SiteStructure) -> Option<&str> {
    structure
        .navigation
        .iter()
        .find_map(|category| category.items.first())
        .map(|item| item.file_reference.as_str())
}
