//! `[ingest]` section configuration.
//!
//! Controls which files are picked up from the input.
//!
//! # Example
//!
//! ```toml
//! [ingest]
//! extensions = [".md", ".markdown", ".txt"]   # Case-insensitive suffix match
//! recursive = true                            # Descend into sub-directories
//! max_file_bytes = 4194304                    # Larger files are skipped
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// Extensions accepted when nothing is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".md", ".markdown", ".txt"];

/// File ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "ingest")]
pub struct IngestConfig {
    /// Accepted file name suffixes (compared case-insensitively).
    pub extensions: Vec<String>,

    /// Walk sub-directories of a directory input.
    #[config(inline_doc = "Walk sub-directories of a directory input.")]
    pub recursive: bool,

    /// Files larger than this are skipped (and logged) instead of read.
    pub max_file_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            recursive: true,
            max_file_bytes: 4 * 1024 * 1024,
        }
    }
}

impl IngestConfig {
    /// Validate ingest configuration.
    ///
    /// # Checks
    /// - at least one extension
    /// - every extension starts with `.`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.extensions,
                "no file extensions configured, nothing would be ingested",
                "e.g. extensions = [\".md\", \".markdown\", \".txt\"]",
            );
        }

        for ext in &self.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                diag.error_with_hint(
                    Self::FIELDS.extensions,
                    format!("invalid extension '{ext}'"),
                    "extensions must start with a dot, e.g. \".md\"",
                );
            }
        }

        if self.max_file_bytes == 0 {
            diag.error(Self::FIELDS.max_file_bytes, "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_ingest_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.ingest.extensions, [".md", ".markdown", ".txt"]);
        assert!(config.ingest.recursive);
    }

    #[test]
    fn test_ingest_rejects_bare_extension() {
        let config = test_parse_config("[ingest]\nextensions = [\"md\"]");
        let mut diag = ConfigDiagnostics::new();
        config.ingest.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_ingest_rejects_empty_extensions() {
        let config = test_parse_config("[ingest]\nextensions = []");
        let mut diag = ConfigDiagnostics::new();
        config.ingest.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
