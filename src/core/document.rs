//! Ingested documents.
//!
//! A [`Document`] is created once at ingestion time and never mutated
//! afterwards. It lives exactly as long as the session that owns it.

use serde::Serialize;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque identity token, unique per upload.
///
/// Derived from the file name, the ingestion timestamp and the position of
/// the file in its batch, so two same-named files (in one batch or across
/// sessions) never share an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Length of the hex-encoded identity.
    const LEN: usize = 16;

    pub fn derive(name: &str, ingested_at: SystemTime, index: usize) -> Self {
        let nanos = ingested_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        let mut hasher = blake3::Hasher::new();
        hasher.update(name.as_bytes());
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&(index as u64).to_le_bytes());

        let hash = hasher.finalize();
        Self(hex::encode(&hash.as_bytes()[..Self::LEN / 2]))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ingested markdown/text file held in memory for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    /// Original file name, case- and whitespace-sensitive.
    name: String,
    content: String,
    modified_at: SystemTime,
}

impl Document {
    pub fn new(
        id: DocumentId,
        name: impl Into<String>,
        content: impl Into<String>,
        modified_at: SystemTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
            modified_at,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }

    /// First `max_chars` characters of the content (char-boundary safe).
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        }
    }
}

/// Build a document with a throwaway identity (tests only).
#[cfg(test)]
pub fn test_document(name: &str, content: &str) -> Document {
    let id = DocumentId::derive(name, UNIX_EPOCH, 0);
    Document::new(id, name, content, UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_identity_differs_for_same_name() {
        let now = SystemTime::now();
        let a = DocumentId::derive("index.md", now, 0);
        let b = DocumentId::derive("index.md", now, 1);
        let c = DocumentId::derive("index.md", now + Duration::from_millis(1), 0);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn test_identity_is_stable() {
        let a = DocumentId::derive("guide.md", UNIX_EPOCH, 3);
        let b = DocumentId::derive("guide.md", UNIX_EPOCH, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let doc = test_document("a.md", "héllo wörld");
        assert_eq!(doc.preview(5), "héllo");
        assert_eq!(doc.preview(500), "héllo wörld");
        assert_eq!(doc.preview(0), "");
    }
}
