//! Static site build.
//!
//! Build pipeline phases:
//! - **Ingest** - read accepted files from the inputs
//! - **Generate** - ask the generator for a navigation structure
//! - **Reconcile** - match navigation entries to documents, report drift
//! - **Write** - one page per reference plus the index and assets

mod write;

pub use write::{prepare_output, write_site};

use crate::{
    cli::GenerateArgs,
    config::SiteConfig,
    core::{Document, SiteStructure},
    debug,
    generate::{GENERATION_FAILED, Generator, STRUCTURE_FILE, StructureGenerator, save_structure},
    ingest::Ingestor,
    log,
    reconcile::{ReconcileReport, Reconciler},
    utils::{path::display_relative, plural::plural_count},
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;

/// Build the static site from `inputs`.
pub fn build_site(config: &SiteConfig, inputs: &[PathBuf], args: &GenerateArgs, save: bool) -> Result<()> {
    let started = Instant::now();

    let documents = Ingestor::new(&config.ingest).ingest_paths(inputs)?;
    let structure = generate(config, &documents, args)?;
    let structure = structure.with_overrides(&config.site.title, &config.site.description);

    let reconciler = Reconciler::new(&structure, &documents);
    log_report(&reconciler.report());

    prepare_output(&config.build.output, config.build.clean)?;
    let stats = write_site(config, &reconciler, false)?;

    if save {
        save_structure(&structure, &config.build.output.join(STRUCTURE_FILE))?;
        debug!("build"; "wrote {}", STRUCTURE_FILE);
    }

    log!(
        "build";
        "{} written to {} in {:.1}s",
        plural_count(stats.pages, "page"),
        display_relative(&config.build.output, config.get_root()),
        started.elapsed().as_secs_f32()
    );
    Ok(())
}

/// Run the configured generator to completion.
fn generate(config: &SiteConfig, documents: &[Document], args: &GenerateArgs) -> Result<SiteStructure> {
    let generator = Generator::from_config(&config.generation, args.structure.as_deref())
        .context(GENERATION_FAILED)?;
    log!(
        "generate";
        "organizing {} with {}",
        plural_count(documents.len(), "document"),
        generator.describe()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;
    let structure = runtime
        .block_on(generator.generate(documents))
        .context(GENERATION_FAILED)?;

    log!(
        "generate";
        "\"{}\": {} in {}",
        structure.site_title,
        plural_count(structure.item_count(), "page"),
        plural_count(structure.navigation.len(), "category")
    );
    Ok(structure)
}

fn log_report(report: &ReconcileReport) {
    log!("reconcile"; "{}", report);

    for entry in report.unresolved() {
        log!(
            "warning";
            "\"{}\" points at '{}', which matches no document",
            entry.title,
            entry.reference
        );
    }
    for entry in report.fuzzy() {
        debug!(
            "reconcile";
            "'{}' matched '{}' ({})",
            entry.reference,
            entry.document.as_deref().unwrap_or_default(),
            entry.kind
        );
    }
    for orphan in &report.orphans {
        debug!("reconcile"; "'{}' is not in the navigation", orphan);
    }
}
