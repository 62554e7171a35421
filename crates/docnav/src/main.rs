//! docnav CLI - documentation site navigation generator.
//!
//! Provides commands for:
//! - `build`: Generate the site configuration document
//! - `releases`: List a locale's release notes in menu order
//! - `redirect`: Simulate the browser-language redirect for one page load

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RedirectArgs, ReleasesArgs};
use output::Output;

/// docnav - Documentation site navigation generator.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (show indexing and build logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the site configuration document.
    Build(BuildArgs),
    /// List release notes of a locale, most recent first.
    Releases(ReleasesArgs),
    /// Simulate the browser-language redirect for one page load.
    Redirect(RedirectArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Releases(args) => args.execute(),
        Commands::Redirect(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
