//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// docugen: organize a folder of markdown files into a documentation site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: docugen.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "docugen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented docugen.toml
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Generate a static documentation site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: GenerateArgs,

        /// Markdown files or directories to ingest
        #[arg(default_value = ".", value_hint = clap::ValueHint::AnyPath)]
        inputs: Vec<PathBuf>,

        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        /// Clean output directory completely before building
        #[arg(short, long)]
        clean: bool,

        /// Also write the navigation structure as site.json
        #[arg(long)]
        save_structure: bool,
    },

    /// Start the local viewer
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        args: GenerateArgs,

        /// Markdown files or directories to analyze at startup.
        /// Without inputs the viewer starts with an upload page.
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        inputs: Vec<PathBuf>,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Shared arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Use a saved structure file instead of calling the generation service
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub structure: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults_to_current_dir() {
        let cli = Cli::parse_from(["docugen", "build"]);
        let Commands::Build { inputs, args, save_structure, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(inputs, [PathBuf::from(".")]);
        assert!(args.structure.is_none());
        assert!(!save_structure);
    }

    #[test]
    fn test_serve_without_inputs() {
        let cli = Cli::parse_from(["docugen", "s", "-p", "8080", "-V"]);
        assert!(cli.is_serve());
        let Commands::Serve { inputs, port, args, .. } = cli.command else {
            panic!("expected serve");
        };
        assert!(inputs.is_empty());
        assert_eq!(port, Some(8080));
        assert!(args.verbose);
    }

    #[test]
    fn test_structure_flag() {
        let cli = Cli::parse_from(["docugen", "b", "docs", "-s", "site.json", "--save-structure"]);
        let Commands::Build { args, save_structure, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.structure, Some(PathBuf::from("site.json")));
        assert!(save_structure);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["docugen", "build", "-C", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
