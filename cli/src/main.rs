//! Chip Solver CLI
//!
//! Tracks buy-ins for a home game in a JSON session file and settles the
//! table at the end of the night.

mod commands;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use commands::Command;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track poker buy-ins and settle who pays whom")]
struct Args {
    /// Session file
    #[arg(
        short,
        long,
        env = "CHIP_SOLVER_SESSION",
        default_value = "chip-solver-session.json"
    )]
    session: PathBuf,

    /// Log settlement internals
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut session = chip_solver_core::Session::load(&args.session)
        .with_context(|| format!("failed to load session {}", args.session.display()))?;

    let changed = commands::run(&mut session, args.command)?;

    if changed {
        session
            .save(&args.session)
            .with_context(|| format!("failed to save session {}", args.session.display()))?;
    }

    Ok(())
}
