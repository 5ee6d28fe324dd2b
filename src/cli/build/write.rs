//! Static site output.
//!
//! ```text
//! dist/
//! ├── index.html        # default selection, or the empty state
//! ├── <slug>.html       # one per distinct navigation reference
//! ├── assets/
//! │   ├── viewer.css
//! │   └── viewer.js
//! └── site.json         # with --save-structure
//! ```

use crate::{
    config::SiteConfig,
    debug,
    embed::ASSETS,
    logger::ProgressLine,
    reconcile::Reconciler,
    viewer::{INDEX_PAGE, MarkdownOptions, PageMode, PulldownRenderer, StaticPages, Theme, ViewerPage, ViewerState},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Counts of what was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub pages: usize,
    pub assets: usize,
}

/// Prepare the output directory, removing it first when `clean` is set.
pub fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory '{}'", output.display()))?;
        debug!("build"; "cleaned {}", output.display());
    }
    fs::create_dir_all(output.join("assets"))
        .with_context(|| format!("Failed to create output directory '{}'", output.display()))
}

/// Write every page and asset of the site.
pub fn write_site(config: &SiteConfig, reconciler: &Reconciler<'_>, quiet: bool) -> Result<WriteStats> {
    let output = &config.build.output;
    let pages = StaticPages::allocate(reconciler);
    let renderer = PulldownRenderer::new(MarkdownOptions::from(&config.render));
    let composer = ViewerPage::new(reconciler, &renderer, &config.site.language);
    // system preference is resolved by viewer.js on static pages
    let theme = Theme::initial(config.render.theme, None);

    let progress = (!quiet).then(|| ProgressLine::new(&[("pages", pages.len() + 1), ("assets", ASSETS.len())]));
    let inc = |name: &str| {
        if let Some(progress) = &progress {
            progress.inc(name);
        }
    };

    let index = composer.render(&ViewerState::new(theme), PageMode::Static(&pages));
    write_file(&output.join(INDEX_PAGE), index.as_bytes())?;
    inc("pages");

    let entries: Vec<_> = pages.iter().collect();
    entries.par_iter().try_for_each(|(reference, file)| {
        let mut state = ViewerState::new(theme);
        state.select(*reference);
        let html = composer.render(&state, PageMode::Static(&pages));
        write_file(&output.join(file), html.as_bytes())?;
        inc("pages");
        Ok::<_, anyhow::Error>(())
    })?;

    for asset in &ASSETS {
        write_file(&output.join(asset.path()), asset.content.as_bytes())?;
        inc("assets");
    }

    if let Some(progress) = progress {
        progress.finish();
    }

    Ok(WriteStats {
        pages: entries.len() + 1,
        assets: ASSETS.len(),
    })
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{test_document, test_structure};
    use tempfile::TempDir;

    fn config(output: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.output = output.to_path_buf();
        config
    }

    #[test]
    fn test_write_site_layout() {
        let temp = TempDir::new().unwrap();
        let config = config(temp.path());
        let structure = test_structure(&[
            ("Welcome", &[("Home", "index.md")]),
            ("Docs", &[("Guide", "guide.md"), ("Missing", "gone.md")]),
        ]);
        let docs = vec![test_document("index.md", "# Home"), test_document("guide.md", "# Guide")];
        let reconciler = Reconciler::new(&structure, &docs);

        prepare_output(temp.path(), false).unwrap();
        let stats = write_site(&config, &reconciler, true).unwrap();
        assert_eq!(stats, WriteStats { pages: 4, assets: 2 });

        let index = fs::read_to_string(temp.path().join("index.html")).unwrap();
        assert!(index.contains("<h1>Home</h1>"));
        assert!(index.contains("data-mode=\"static\""));

        let guide = fs::read_to_string(temp.path().join("guide.html")).unwrap();
        assert!(guide.contains("<h1>Guide</h1>"));

        // unresolved references still get a page showing the empty state
        let gone = fs::read_to_string(temp.path().join("gone.html")).unwrap();
        assert!(gone.contains("Select a Page"));

        assert!(temp.path().join("index-2.html").is_file());
        assert!(temp.path().join("assets/viewer.css").is_file());
        assert!(temp.path().join("assets/viewer.js").is_file());
    }

    #[test]
    fn test_prepare_output_clean() {
        let temp = TempDir::new().unwrap();
        let stale = temp.path().join("stale.html");
        fs::write(&stale, "old").unwrap();

        prepare_output(temp.path(), false).unwrap();
        assert!(stale.exists());

        prepare_output(temp.path(), true).unwrap();
        assert!(!stale.exists());
        assert!(temp.path().join("assets").is_dir());
    }
}
