//! File ingestion.
//!
//! Turns user-provided inputs into an ordered list of [`Document`]s:
//!
//! - paths on disk (files or directories, walked with `jwalk`)
//! - in-memory uploads posted to the viewer server
//!
//! Files whose name does not end with an accepted extension are dropped
//! silently. Unreadable or oversized files are logged and skipped. Only an
//! empty result is an error ([`IngestError::NoValidFiles`]).

mod source;

pub use source::{Candidate, Upload};

use crate::config::IngestConfig;
use crate::core::{Document, DocumentId};
use crate::{debug_do, log};
use crate::utils::plural::plural_count;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Ingestion failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Nothing in the batch was acceptable.
    #[error("No valid Markdown files found. Please upload .md files.")]
    NoValidFiles,

    /// An input path does not exist.
    #[error("input not found: {0}")]
    Missing(PathBuf),

    /// Directory traversal failed.
    #[error("failed to walk {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads accepted files into documents according to `[ingest]`.
#[derive(Debug, Clone, Copy)]
pub struct Ingestor<'a> {
    config: &'a IngestConfig,
}

impl<'a> Ingestor<'a> {
    pub fn new(config: &'a IngestConfig) -> Self {
        Self { config }
    }

    /// Whether `name` ends with an accepted extension (case-insensitive).
    pub fn accepts(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.config
            .extensions
            .iter()
            .any(|ext| name.ends_with(&ext.to_lowercase()))
    }

    /// Ingest files and directories from disk.
    ///
    /// Files are read in parallel; the result keeps input order (and sorted
    /// walk order within each directory).
    pub fn ingest_paths(&self, inputs: &[PathBuf]) -> Result<Vec<Document>, IngestError> {
        let candidates = source::collect(inputs, self)?;
        let ingested_at = SystemTime::now();
        let max_bytes = self.config.max_file_bytes;

        let documents: Vec<Document> = candidates
            .par_iter()
            .enumerate()
            .filter_map(|(index, candidate)| read_candidate(candidate, index, ingested_at, max_bytes))
            .collect();

        self.finish(documents, candidates.len())
    }

    /// Ingest files uploaded to the viewer server.
    pub fn ingest_uploads(&self, uploads: Vec<Upload>) -> Result<Vec<Document>, IngestError> {
        let total = uploads.len();
        let ingested_at = SystemTime::now();
        let max_bytes = usize::try_from(self.config.max_file_bytes).unwrap_or(usize::MAX);

        let documents = uploads
            .into_iter()
            .filter(|upload| self.accepts(&upload.name))
            .enumerate()
            .filter_map(|(index, upload)| {
                if upload.content.len() > max_bytes {
                    log!("ingest"; "skipping {}: larger than {} bytes", upload.name, max_bytes);
                    return None;
                }
                let id = DocumentId::derive(&upload.name, ingested_at, index);
                let modified_at = UNIX_EPOCH + Duration::from_millis(upload.last_modified);
                Some(Document::new(id, upload.name, upload.content, modified_at))
            })
            .collect();

        self.finish(documents, total)
    }

    fn finish(&self, documents: Vec<Document>, seen: usize) -> Result<Vec<Document>, IngestError> {
        if documents.is_empty() {
            return Err(IngestError::NoValidFiles);
        }
        log!("ingest"; "accepted {} of {}", plural_count(documents.len(), "file"), seen);
        debug_do! {
            for doc in &documents {
                let modified = doc.modified_at().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
                log!("ingest"; "{} {} ({} bytes, modified at {})", doc.id(), doc.name(), doc.content().len(), modified);
            }
        }
        Ok(documents)
    }
}

/// Read one candidate; failures are logged and yield `None`.
fn read_candidate(
    candidate: &Candidate,
    index: usize,
    ingested_at: SystemTime,
    max_bytes: u64,
) -> Option<Document> {
    let metadata = match fs::metadata(&candidate.path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log!("ingest"; "skipping {}: {}", candidate.name, e);
            return None;
        }
    };
    if metadata.len() > max_bytes {
        log!("ingest"; "skipping {}: larger than {} bytes", candidate.name, max_bytes);
        return None;
    }

    match fs::read_to_string(&candidate.path) {
        Ok(content) => {
            let id = DocumentId::derive(&candidate.name, ingested_at, index);
            let modified_at = metadata.modified().unwrap_or(ingested_at);
            Some(Document::new(id, candidate.name.clone(), content, modified_at))
        }
        Err(e) => {
            log!("ingest"; "skipping {}: {}", candidate.name, e);
            None
        }
    }
}
