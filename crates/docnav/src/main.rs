//! docnav CLI - Documentation site navigation.
//!
//! Provides commands for:
//! - `check`: Validate the navigation configuration
//! - `resolve`: Print the resolved navigation for a route as JSON
//! - `render`: Render a route into the default HTML shell
//! - `pages`: List every sidebar page with its previous and next page

mod commands;
mod error;
mod output;
mod site;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PagesArgs, RenderArgs, ResolveArgs};
use output::Output;

/// docnav - Documentation site navigation.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the navigation configuration.
    Check(CheckArgs),
    /// Resolve navigation for a route.
    Resolve(ResolveArgs),
    /// Render a route into an HTML page.
    Render(RenderArgs),
    /// List sidebar pages with pagination.
    Pages(PagesArgs),
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
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Pages(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
