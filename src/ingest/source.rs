//! Ingestion sources: paths on disk and uploaded files.

use super::{IngestError, Ingestor};
use crate::log;
use crate::utils::path::display_relative;
use jwalk::WalkDir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Files never offered to the organizer.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// A file on disk that passed the extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Document name: the file name, or the path relative to the walked
    /// directory (always `/`-separated).
    pub name: String,
}

/// A file posted to the viewer server's upload endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub name: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_modified: u64,
}

impl Upload {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, content: impl Into<String>, last_modified: u64) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            last_modified,
        }
    }
}

/// Expand inputs into accepted candidates, preserving input order.
pub(super) fn collect(inputs: &[PathBuf], ingestor: &Ingestor) -> Result<Vec<Candidate>, IngestError> {
    let mut candidates = Vec::new();

    for input in inputs {
        if input.is_dir() {
            walk_dir(input, ingestor, &mut candidates)?;
        } else if input.is_file() {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if ingestor.accepts(&name) {
                candidates.push(Candidate {
                    path: input.clone(),
                    name,
                });
            }
        } else {
            return Err(IngestError::Missing(input.clone()));
        }
    }

    Ok(candidates)
}

fn walk_dir(dir: &Path, ingestor: &Ingestor, out: &mut Vec<Candidate>) -> Result<(), IngestError> {
    let depth = if ingestor.config.recursive { usize::MAX } else { 1 };

    // an unreadable root is an error, unreadable entries below it are not
    fs::read_dir(dir).map_err(|source| IngestError::Walk {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in WalkDir::new(dir).sort(true).max_depth(depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log!("ingest"; "skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if IGNORED_FILES.contains(&file_name.as_ref()) || !ingestor.accepts(&file_name) {
            continue;
        }

        let path = entry.path();
        out.push(Candidate {
            name: display_relative(&path, dir),
            path,
        });
    }

    Ok(())
}
