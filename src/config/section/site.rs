//! `[site]` section configuration.
//!
//! Values set here take precedence over what the generation service
//! proposes for the site header.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Acme Handbook"     # Overrides the generated site title
//! description = ""            # Empty: keep the generated tagline
//! language = "en"             # <html lang> attribute
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

/// Site metadata overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "site")]
pub struct SiteSectionConfig {
    /// Site title. Empty keeps the generated one.
    #[config(inline_doc = "Empty keeps the generated title.")]
    pub title: String,

    /// Site description. Empty keeps the generated one.
    #[config(inline_doc = "Empty keeps the generated tagline.")]
    pub description: String,

    /// Language code (e.g., "en", "zh-Hans").
    #[config(default = "en", inline_doc)]
    pub language: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            language: "en".into(),
        }
    }
}
