//! docugen - organize a folder of markdown files into a documentation site.

mod cli;
mod config;
mod core;
mod embed;
mod generate;
mod ingest;
mod logger;
mod reconcile;
mod session;
mod utils;
mod viewer;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Init { dry, .. } => cli::init::new_project(&config, *dry),
        Commands::Build {
            args,
            inputs,
            save_structure,
            ..
        } => cli::build::build_site(&config, inputs, args, *save_structure),
        Commands::Serve { args, inputs, .. } => cli::serve::serve(config, inputs, args),
    }
}
