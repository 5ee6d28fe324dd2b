//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `page.html` - document shell shared by every page
//! - `assets/viewer.{js,css}` - minified by `build.rs` into `OUT_DIR`
//!
//! # Usage
//!
//! ```ignore
//! use embed::{PAGE_HTML, PageVars};
//! let html = PAGE_HTML.render(&vars);
//! ```

mod template;

pub use template::{Template, TemplateVars, fill};

use crate::utils::mime;

/// Variables for page.html.
///
/// `title` is escaped by the caller; `head` and `body` are trusted HTML.
pub struct PageVars<'a> {
    pub lang: &'a str,
    pub title: &'a str,
    /// `light`, `dark` or `system` (resolved by viewer.js)
    pub theme: &'a str,
    /// `static` or `live`
    pub mode: &'a str,
    /// Prefix for `assets/...` URLs (`""` or `/`)
    pub asset_base: &'a str,
    pub head: &'a str,
    pub body: &'a str,
}

impl TemplateVars for PageVars<'_> {
    fn apply(&self, content: &str) -> String {
        fill(
            content,
            &[
                ("LANG", self.lang),
                ("TITLE", self.title),
                ("THEME", self.theme),
                ("MODE", self.mode),
                ("ASSET_BASE", self.asset_base),
                ("HEAD", self.head),
                ("BODY", self.body),
            ],
        )
    }
}

/// Document shell shared by static and live pages.
pub const PAGE_HTML: Template<PageVars<'static>> = Template::new(include_str!("page.html"));

/// A file served or written under `assets/`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    /// File name below `assets/`
    pub name: &'static str,
    pub content: &'static str,
}

impl EmbeddedAsset {
    pub fn mime(&self) -> &'static str {
        mime::from_path(std::path::Path::new(self.name))
    }

    /// Path relative to the site root.
    pub fn path(&self) -> String {
        format!("assets/{}", self.name)
    }
}

/// Viewer script: search filter, theme and source toggles, upload form.
pub const VIEWER_JS: EmbeddedAsset = EmbeddedAsset {
    name: "viewer.js",
    content: include_str!(concat!(env!("OUT_DIR"), "/viewer.min.js")),
};

/// Viewer stylesheet.
pub const VIEWER_CSS: EmbeddedAsset = EmbeddedAsset {
    name: "viewer.css",
    content: include_str!(concat!(env!("OUT_DIR"), "/viewer.min.css")),
};

pub static ASSETS: [EmbeddedAsset; 2] = [VIEWER_CSS, VIEWER_JS];

/// Look up an asset by file name.
pub fn asset(name: &str) -> Option<&'static EmbeddedAsset> {
    ASSETS.iter().find(|asset| asset.name == name)
}
