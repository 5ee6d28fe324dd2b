//! Structure generation.
//!
//! Sends a lightweight manifest of the documents (name plus a bounded
//! content preview, never full content) to a generator and returns the
//! validated [`SiteStructure`].
//!
//! | Generator           | Source                                      |
//! |---------------------|---------------------------------------------|
//! | [`GeminiGenerator`] | remote `generateContent` endpoint           |
//! | [`SavedStructure`]  | a `site.json` written by an earlier build   |
//!
//! No generator retries automatically or applies a partial structure.

mod gemini;
mod prompt;
mod saved;
mod validate;

pub use gemini::GeminiGenerator;
pub use saved::{STRUCTURE_FILE, SavedStructure, save_structure};

use crate::config::GenerationConfig;
use crate::core::{Document, SiteStructure};
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Message shown to users for every generation failure.
pub const GENERATION_FAILED: &str = "Failed to generate site structure. Please try again.";

/// Why a structure could not be produced.
///
/// All variants are the same condition to the user ([`GENERATION_FAILED`]);
/// the detail is for logs.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no content")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("response does not match the structure schema: {0}")]
    Invalid(String),

    #[error("no API key: set {env} or generation.api_key_file")]
    MissingCredential { env: String },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    /// The user-facing message for this failure.
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED
    }
}

/// Produces a navigation structure for a set of documents.
pub trait StructureGenerator: Send + Sync {
    fn generate(
        &self,
        documents: &[Document],
    ) -> impl Future<Output = Result<SiteStructure, GenerationError>> + Send;
}

/// One manifest entry as sent to the service.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ManifestEntry<'a> {
    pub name: &'a str,
    pub preview: &'a str,
}

/// Build the manifest: every document's name and first `preview_chars`
/// characters, in document order.
pub fn manifest(documents: &[Document], preview_chars: usize) -> Vec<ManifestEntry<'_>> {
    documents
        .iter()
        .map(|doc| ManifestEntry {
            name: doc.name(),
            preview: doc.preview(preview_chars),
        })
        .collect()
}

/// Generator chosen at startup: a saved structure file when given,
/// otherwise the remote service.
#[derive(Debug, Clone)]
pub enum Generator {
    Gemini(GeminiGenerator),
    Saved(SavedStructure),
}

impl Generator {
    pub fn from_config(
        config: &GenerationConfig,
        structure_file: Option<&Path>,
    ) -> Result<Self, GenerationError> {
        match structure_file {
            Some(path) => Ok(Self::Saved(SavedStructure::new(path))),
            None => GeminiGenerator::from_config(config).map(Self::Gemini),
        }
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Gemini(_) => "generation service".to_string(),
            Self::Saved(saved) => saved.path().display().to_string(),
        }
    }
}

impl StructureGenerator for Generator {
    async fn generate(&self, documents: &[Document]) -> Result<SiteStructure, GenerationError> {
        match self {
            Self::Gemini(generator) => generator.generate(documents).await,
            Self::Saved(generator) => generator.generate(documents).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_document;

    #[test]
    fn test_manifest_preview_bounded() {
        let docs = vec![
            test_document("index.md", &"a".repeat(600)),
            test_document("short.md", "tiny"),
        ];
        let manifest = manifest(&docs, 500);

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].name, "index.md");
        assert_eq!(manifest[0].preview.chars().count(), 500);
        assert_eq!(manifest[1].preview, "tiny");
    }

    #[test]
    fn test_manifest_serializes_name_and_preview_only() {
        let docs = vec![test_document("a.md", "body")];
        let json = serde_json::to_value(manifest(&docs, 500)).unwrap();
        assert_eq!(json, serde_json::json!([{ "name": "a.md", "preview": "body" }]));
    }

    #[test]
    fn test_saved_generator_selected_with_structure_file() {
        let generator =
            Generator::from_config(&GenerationConfig::default(), Some(Path::new("site.json")))
                .unwrap();
        assert!(matches!(generator, Generator::Saved(_)));
        assert_eq!(generator.describe(), "site.json");
    }

    #[test]
    fn test_every_failure_has_same_user_message() {
        let errors = [
            GenerationError::EmptyResponse,
            GenerationError::Invalid("x".into()),
            GenerationError::MissingCredential { env: "K".into() },
        ];
        for err in errors {
            assert_eq!(err.user_message(), GENERATION_FAILED);
        }
    }
}
