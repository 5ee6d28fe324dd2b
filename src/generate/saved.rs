//! Structures saved to disk (`site.json`).
//!
//! Loading a saved structure skips the service call entirely but goes
//! through the same validation as a live response.

use super::{GenerationError, StructureGenerator, validate::parse_structure};
use crate::core::{Document, SiteStructure};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name for a saved structure in the output directory.
pub const STRUCTURE_FILE: &str = "site.json";

/// Generator that replays a structure from a JSON file.
#[derive(Debug, Clone)]
pub struct SavedStructure {
    path: PathBuf,
}

impl SavedStructure {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SiteStructure, GenerationError> {
        let text = fs::read_to_string(&self.path).map_err(|source| GenerationError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_structure(&text)
    }
}

impl StructureGenerator for SavedStructure {
    async fn generate(&self, _documents: &[Document]) -> Result<SiteStructure, GenerationError> {
        self.load()
    }
}

/// Write `structure` as pretty JSON using the service's field names.
pub fn save_structure(structure: &SiteStructure, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(structure)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_structure;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_replay() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STRUCTURE_FILE);
        let structure = test_structure(&[("Welcome", &[("Home", "index.md")])]);

        save_structure(&structure, &path).unwrap();
        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"fileName\": \"index.md\""));

        let loaded = SavedStructure::new(&path).generate(&[]).await.unwrap();
        assert_eq!(loaded, structure);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = SavedStructure::new("/nonexistent/site.json")
            .generate(&[])
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Read { .. }));
    }

    #[tokio::test]
    async fn test_invalid_saved_structure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "siteTitle": "x" }"#).unwrap();

        let err = SavedStructure::new(&path).generate(&[]).await.unwrap_err();
        assert!(matches!(err, GenerationError::Invalid(_)));
    }
}
