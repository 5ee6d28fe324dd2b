//! `[generation]` section configuration.
//!
//! Settings for the structure generation service (a Gemini-compatible
//! `generateContent` endpoint).
//!
//! # Example
//!
//! ```toml
//! [generation]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta"
//! model = "gemini-2.5-flash"
//! api_key_env = "GEMINI_API_KEY"      # Environment variable holding the key
//! api_key_file = "~/.config/gemini"   # Used when the variable is unset
//! preview_chars = 500                 # Content preview sent per file
//! timeout_secs = 0                    # 0 = wait indefinitely
//! ```
//!
//! Full file content is never sent; only the name and the first
//! `preview_chars` characters of each document.

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "generation")]
pub struct GenerationConfig {
    /// Base URL of the service (without the `/models/...` suffix).
    #[config(default = "https://generativelanguage.googleapis.com/v1beta")]
    pub endpoint: String,

    /// Model name.
    #[config(default = "gemini-2.5-flash", inline_doc = "Model name.")]
    pub model: String,

    /// Environment variable holding the API key.
    #[config(default = "GEMINI_API_KEY")]
    pub api_key_env: String,

    /// File holding the API key, read when the environment variable is unset.
    #[config(inline_doc = "Read when the environment variable is unset.")]
    pub api_key_file: Option<PathBuf>,

    /// Characters of content preview sent per document.
    #[config(inline_doc = "Characters of content preview sent per document.")]
    pub preview_chars: usize,

    /// Request timeout in seconds. 0 waits indefinitely.
    #[config(inline_doc = "0 waits indefinitely.")]
    pub timeout_secs: u64,

    /// Sampling temperature passed to the model.
    #[config(inline_doc = "0.0 to 2.0; the model default when unset.")]
    pub temperature: Option<f32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.5-flash".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            api_key_file: None,
            preview_chars: 500,
            timeout_secs: 0,
            temperature: None,
        }
    }
}

impl GenerationConfig {
    /// Resolve `api_key_file` relative to the project root, expanding `~`.
    pub fn normalize(&mut self, root: &Path) {
        if let Some(path) = self.api_key_file.take() {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            let path = PathBuf::from(expanded);
            let full = if path.is_relative() { root.join(path) } else { path };
            self.api_key_file = Some(crate::utils::path::normalize_path(&full));
        }
    }

    /// Validate generation configuration.
    ///
    /// # Checks
    /// - `endpoint` is an http(s) URL with a host
    /// - `model` is not empty
    /// - `preview_chars` is greater than 0
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.endpoint) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::FIELDS.endpoint,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://generativelanguage.googleapis.com/v1beta",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error(Self::FIELDS.endpoint, "URL must have a valid host");
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::FIELDS.endpoint,
                    format!("invalid URL: {}", e),
                    "use format like https://generativelanguage.googleapis.com/v1beta",
                );
            }
        }

        if self.model.trim().is_empty() {
            diag.error(Self::FIELDS.model, "model name must not be empty");
        }

        if self.preview_chars == 0 {
            diag.error_with_hint(
                Self::FIELDS.preview_chars,
                "must be greater than 0",
                "the service needs a content preview to categorize files",
            );
        }

        if let Some(temp) = self.temperature
            && !(0.0..=2.0).contains(&temp)
        {
            diag.error(Self::FIELDS.temperature, "must be between 0.0 and 2.0");
        }
    }

    /// Timeout as a duration, `None` when waiting indefinitely.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.timeout_secs > 0).then(|| std::time::Duration::from_secs(self.timeout_secs))
    }
}
