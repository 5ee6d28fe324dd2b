//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"             # Output directory (relative to project root)
//! clean = false               # Remove the output directory before building
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static site output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "build")]
pub struct BuildSectionConfig {
    /// Output directory for the generated site.
    #[config(default = "dist", inline_doc = "Relative to the project root.")]
    pub output: PathBuf,

    /// Remove the output directory before building.
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            clean: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.clean);
    }

    #[test]
    fn test_build_output_override() {
        let config = test_parse_config("[build]\noutput = \"public\"\nclean = true");
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(config.build.clean);
    }
}
