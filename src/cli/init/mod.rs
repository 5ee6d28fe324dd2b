//! Project initialization.
//!
//! Writes a commented `docugen.toml` (every section at its defaults) and
//! ignore files for the output directory.

mod config;

use crate::{
    config::{CONFIG_FILE, SiteConfig},
    log,
};
use anyhow::{Context, Result, bail};
use std::fs;

/// Initialize a project in the configured root.
///
/// If `dry_run` is true, only prints the config template to stdout.
pub fn new_project(site_config: &SiteConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    let root = site_config.get_root();
    if root.join(CONFIG_FILE).exists() {
        bail!(
            "'{}' already exists in {}.\n\
             Remove it or use `docugen init --dry` to print the template.",
            CONFIG_FILE,
            root.display()
        );
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    config::write_config(root)?;
    config::write_ignore_files(root, &site_config.build.output)?;

    log!("init"; "wrote {}", root.join(CONFIG_FILE).display());
    Ok(())
}
