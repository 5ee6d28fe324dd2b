//! Reference-to-document resolution.

use crate::core::Document;
use std::fmt;

/// How a reference was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
    Trimmed,
    Unresolved,
}

impl MatchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::Trimmed => "trimmed",
            Self::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving one reference.
///
/// `Unresolved` is an ordinary value: it renders as an empty state and is
/// never substituted with some other document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Exact(&'a Document),
    CaseInsensitive(&'a Document),
    Trimmed(&'a Document),
    Unresolved,
}

impl<'a> Resolution<'a> {
    pub fn document(self) -> Option<&'a Document> {
        match self {
            Self::Exact(doc) | Self::CaseInsensitive(doc) | Self::Trimmed(doc) => Some(doc),
            Self::Unresolved => None,
        }
    }

    pub fn kind(self) -> MatchKind {
        match self {
            Self::Exact(_) => MatchKind::Exact,
            Self::CaseInsensitive(_) => MatchKind::CaseInsensitive,
            Self::Trimmed(_) => MatchKind::Trimmed,
            Self::Unresolved => MatchKind::Unresolved,
        }
    }
}

/// Resolve `reference` against `documents`.
///
/// Strategies run in order, each over the whole list, first match wins:
///
/// 1. byte-for-byte equality
/// 2. equality after Unicode lowercasing
/// 3. equality after trimming surrounding whitespace
pub fn resolve<'a>(reference: &str, documents: &'a [Document]) -> Resolution<'a> {
    if let Some(doc) = documents.iter().find(|d| d.name() == reference) {
        return Resolution::Exact(doc);
    }

    let lowered = reference.to_lowercase();
    if let Some(doc) = documents.iter().find(|d| d.name().to_lowercase() == lowered) {
        return Resolution::CaseInsensitive(doc);
    }

    let trimmed = reference.trim();
    if let Some(doc) = documents.iter().find(|d| d.name().trim() == trimmed) {
        return Resolution::Trimmed(doc);
    }

    Resolution::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_document;

    fn docs() -> Vec<Document> {
        vec![
            test_document("index.md", "home"),
            test_document("API.MD", "api"),
            test_document(" Notes.md ", "notes"),
            test_document("Guide.md", "upper guide"),
            test_document("guide.md", "lower guide"),
        ]
    }

    #[test]
    fn test_exact_match() {
        let docs = docs();
        let res = resolve("index.md", &docs);
        assert_eq!(res.kind(), MatchKind::Exact);
        assert_eq!(res.document().unwrap().content(), "home");
    }

    #[test]
    fn test_exact_preferred_over_case_insensitive() {
        let docs = docs();
        assert_eq!(resolve("guide.md", &docs).document().unwrap().content(), "lower guide");
        assert_eq!(resolve("Guide.md", &docs).document().unwrap().content(), "upper guide");
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let docs = docs();
        let res = resolve("api.md", &docs);
        assert_eq!(res.kind(), MatchKind::CaseInsensitive);
        assert_eq!(res.document().unwrap().name(), "API.MD");
    }

    #[test]
    fn test_case_insensitive_first_in_document_order() {
        let docs = docs();
        let res = resolve("GUIDE.MD", &docs);
        assert_eq!(res.document().unwrap().content(), "upper guide");
    }

    #[test]
    fn test_unicode_lowercase() {
        let docs = vec![test_document("Über.md", "u")];
        assert_eq!(resolve("über.md", &docs).kind(), MatchKind::CaseInsensitive);
    }

    #[test]
    fn test_trimmed_fallback() {
        let docs = docs();
        let res = resolve("Notes.md", &docs);
        assert_eq!(res.kind(), MatchKind::Trimmed);

        let docs = vec![test_document("index.md", "home")];
        assert_eq!(resolve("  index.md\n", &docs).kind(), MatchKind::Trimmed);
    }

    #[test]
    fn test_trim_does_not_ignore_case() {
        let docs = vec![test_document("index.md", "home")];
        assert_eq!(resolve(" INDEX.md ", &docs), Resolution::Unresolved);
    }

    #[test]
    fn test_unresolved() {
        let docs = docs();
        assert_eq!(resolve("missing.md", &docs), Resolution::Unresolved);
        assert_eq!(resolve("", &docs), Resolution::Unresolved);
        assert_eq!(resolve("index.md", &[]), Resolution::Unresolved);
    }
}
