//! Summary of how navigation entries matched the documents.

use super::{MatchKind, resolve};
use crate::core::{Document, SiteStructure};
use crate::utils::plural::plural_count;
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub title: String,
    pub reference: String,
    pub kind: MatchKind,
    /// Name of the matched document, if any.
    pub document: Option<String>,
}

/// Per-item match kinds plus documents no item points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub entries: Vec<ReportEntry>,
    pub orphans: Vec<String>,
}

impl ReconcileReport {
    pub fn build(structure: &SiteStructure, documents: &[Document]) -> Self {
        let mut referenced = FxHashSet::default();

        let entries = structure
            .items()
            .map(|(_, item)| {
                let resolution = resolve(&item.file_reference, documents);
                let document = resolution.document().map(|doc| {
                    referenced.insert(doc.id().clone());
                    doc.name().to_string()
                });
                ReportEntry {
                    title: item.title.clone(),
                    reference: item.file_reference.clone(),
                    kind: resolution.kind(),
                    document,
                }
            })
            .collect();

        let orphans = documents
            .iter()
            .filter(|doc| !referenced.contains(doc.id()))
            .map(|doc| doc.name().to_string())
            .collect();

        Self { entries, orphans }
    }

    pub fn count(&self, kind: MatchKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.kind == MatchKind::Unresolved)
    }

    /// Entries that only matched through a fallback strategy.
    pub fn fuzzy(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, MatchKind::CaseInsensitive | MatchKind::Trimmed))
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} exact, {} case-insensitive, {} trimmed, {} unresolved, {}",
            self.count(MatchKind::Exact),
            self.count(MatchKind::CaseInsensitive),
            self.count(MatchKind::Trimmed),
            self.count(MatchKind::Unresolved),
            plural_count(self.orphans.len(), "orphan"),
        )
    }
}
