//! mdprop CLI - Markdown proposal tooling.
//!
//! Provides commands for:
//! - `convert`: Render a Markdown proposal as themed HTML
//! - `export`: Collect pending diagram spans into a JSON side file
//! - `apply`: Substitute externally generated markup from the cache
//! - `check`: Audit diagram-block tagging
//! - `validate`: Validate proposal structure against the fixed outline
//! - `themes`: List available themes
//! - `new`: Scaffold a proposal skeleton

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    ApplyArgs, CheckArgs, ConvertArgs, ExportArgs, NewArgs, ThemesArgs, ValidateArgs,
};
use output::Output;

/// mdprop - Markdown proposal tooling.
#[derive(Parser)]
#[command(name = "mdprop", version, about)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown proposal to themed HTML.
    Convert(ConvertArgs),
    /// Export pending diagram spans to a JSON side file.
    Export(ExportArgs),
    /// Substitute cached markup over pending spans.
    Apply(ApplyArgs),
    /// Check that ASCII diagram blocks are tagged.
    Check(CheckArgs),
    /// Validate proposal structure.
    Validate(ValidateArgs),
    /// List available themes.
    Themes(ThemesArgs),
    /// Create a proposal skeleton.
    New(NewArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Apply(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Themes(args) => args.execute(),
        Commands::New(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
