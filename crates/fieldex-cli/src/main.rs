//! CLI application for rule-based text field extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, parse, profile};

/// fieldex - Extract structured fields from semi-structured text
#[derive(Parser)]
#[command(name = "fieldex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single text file
    Parse(parse::ParseArgs),

    /// Parse multiple text files
    Batch(batch::BatchArgs),

    /// Manage extraction profiles
    Profile(profile::ProfileArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse(args) => parse::run(args),
        Commands::Batch(args) => batch::run(args),
        Commands::Profile(args) => profile::run(args),
    }
}
