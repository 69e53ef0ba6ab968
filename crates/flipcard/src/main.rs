//! flipcard CLI - Flashcard renderer.
//!
//! Provides commands for:
//! - `render`: Render one markdown document to HTML
//! - `build`: Render a directory of markdown documents into a static site
//! - `assets`: Publish the flashcard stylesheet and script

mod commands;
mod error;
mod output;
mod site;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AssetsArgs, BuildArgs, RenderArgs};
use output::Output;

/// flipcard - Flashcard renderer for markdown.
#[derive(Parser)]
#[command(name = "flipcard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single markdown document.
    Render(RenderArgs),
    /// Render every markdown document under the source directory.
    Build(BuildArgs),
    /// Write the flashcard stylesheet and script.
    Assets(AssetsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.common.verbose,
            Self::Build(args) => args.common.verbose,
            Self::Assets(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Assets(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
