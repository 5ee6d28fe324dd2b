//! Configuration file generation.
//!
//! Creates docugen.toml and ignore files for new projects.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::config::{
    BuildSectionConfig, CONFIG_FILE, GenerationConfig, IngestConfig, RenderConfig, ServeConfig,
    SiteSectionConfig,
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Generate docugen.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# docugen configuration file (v{})\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("# Every key is optional; the values below are the defaults.\n\n");

    let sections = [
        SiteSectionConfig::template_with_header(),
        IngestConfig::template_with_header(),
        GenerationConfig::template_with_header(),
        RenderConfig::template_with_header(),
        BuildSectionConfig::template_with_header(),
        ServeConfig::template_with_header(),
    ];
    out.push_str(&sections.join("\n"));

    out
}

/// Write the default docugen.toml
pub fn write_config(root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    fs::write(&path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Write .gitignore and .ignore files excluding the output directory and
/// saved structures.
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let patterns = [
        output_pattern.to_string_lossy().into_owned(),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // don't overwrite user's ignore files
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path()).unwrap();

        let content = fs::read_to_string(temp.path().join(CONFIG_FILE)).unwrap();
        for section in ["[site]", "[ingest]", "[generation]", "[render]", "[build]", "[serve]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_template_parses_back() {
        let template = generate_config_template();
        let config = crate::config::SiteConfig::from_str(&template).unwrap();
        assert_eq!(config.serve.port, 5288);
        assert_eq!(config.generation.preview_chars, 500);
    }

    #[test]
    fn test_write_ignore_files() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path(), Path::new("dist")).unwrap();

        let content = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(content.contains("/dist"));
    }

    #[test]
    fn test_ignore_files_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path(), Path::new("dist")).unwrap();

        let content = fs::read_to_string(&gitignore).unwrap();
        assert_eq!(content, "custom content");
    }
}
