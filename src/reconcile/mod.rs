//! Navigation reconciliation.
//!
//! The generated structure names documents by `fileName`, which is only
//! expected to equal a document name. This module turns those references
//! back into documents and derives the views the viewer shows:
//!
//! - [`resolve`]: exact, then case-insensitive, then trimmed match
//! - [`filtered_navigation`]: search over item titles
//! - [`TitleIndex`]: breadcrumb title and category per reference
//! - [`default_selection`]: what to show when nothing is selected
//!
//! Nothing here fails: a missing match is [`Resolution::Unresolved`] and an
//! empty structure has no default selection.

mod index;
mod report;
mod resolve;

pub use index::{FilteredCategory, TitleEntry, TitleIndex, default_selection, filtered_navigation};
pub use report::ReconcileReport;
pub use resolve::{MatchKind, Resolution, resolve};

use crate::core::{Document, SiteStructure};

/// Reconciliation of one structure against one document list.
///
/// Resolution is recomputed on every call; nothing caches a pointer from
/// reference to document.
#[derive(Debug)]
pub struct Reconciler<'a> {
    structure: &'a SiteStructure,
    documents: &'a [Document],
    titles: TitleIndex<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(structure: &'a SiteStructure, documents: &'a [Document]) -> Self {
        Self {
            structure,
            documents,
            titles: TitleIndex::build(structure),
        }
    }

    pub fn structure(&self) -> &'a SiteStructure {
        self.structure
    }

    pub fn resolve(&self, reference: &str) -> Resolution<'a> {
        resolve(reference, self.documents)
    }

    pub fn lookup(&self, reference: &str) -> Option<TitleEntry<'a>> {
        self.titles.get(reference)
    }

    pub fn filtered(&self, term: &str) -> Vec<FilteredCategory<'a>> {
        filtered_navigation(self.structure, term)
    }

    pub fn default_selection(&self) -> Option<&'a str> {
        default_selection(self.structure)
    }

    /// Heading for a resolved document: its navigation title, else its name.
    pub fn page_title(&self, reference: &str, document: &'a Document) -> &'a str {
        self.lookup(reference)
            .map_or_else(|| document.name(), |entry| entry.title)
    }

    /// Distinct references in navigation order.
    pub fn references(&self) -> Vec<&'a str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.structure
            .items()
            .map(|(_, item)| item.file_reference.as_str())
            .filter(|reference| seen.insert(*reference))
            .collect()
    }

    pub fn report(&self) -> ReconcileReport {
        ReconcileReport::build(self.structure, self.documents)
    }
}
