//! `[render]` section configuration.
//!
//! Markdown extensions and the viewer's initial theme.
//!
//! # Example
//!
//! ```toml
//! [render]
//! tables = true
//! footnotes = true
//! strikethrough = true
//! task_lists = true
//! raw_html = true             # false: embedded HTML is shown as text
//! theme = "system"            # system | light | dark
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

/// Initial color theme of the viewer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the user's system preference (default).
    #[default]
    System,
    Light,
    Dark,
}

/// Markdown rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "render")]
pub struct RenderConfig {
    /// Enable GFM tables.
    pub tables: bool,

    /// Enable footnotes.
    pub footnotes: bool,

    /// Enable `~~strikethrough~~`.
    pub strikethrough: bool,

    /// Enable `- [x]` task lists.
    pub task_lists: bool,

    /// Pass embedded HTML through unchanged.
    #[config(inline_doc = "false: embedded HTML is shown as text.")]
    pub raw_html: bool,

    /// Initial color theme: system | light | dark.
    #[config(default = "system")]
    pub theme: ThemePreference,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            raw_html: true,
            theme: ThemePreference::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_render_defaults() {
        let config = test_parse_config("");
        assert!(config.render.tables);
        assert!(config.render.raw_html);
        assert_eq!(config.render.theme, ThemePreference::System);
    }

    #[test]
    fn test_theme_parsing() {
        for (input, expected) in [
            ("system", ThemePreference::System),
            ("light", ThemePreference::Light),
            ("dark", ThemePreference::Dark),
        ] {
            let config = test_parse_config(&format!("[render]\ntheme = \"{input}\""));
            assert_eq!(config.render.theme, expected, "theme failed for {input}");
        }
    }
}
