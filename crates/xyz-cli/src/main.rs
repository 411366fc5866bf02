use std::error::Error;
use std::io;

use clap::{Parser, Subcommand};
use commands::{
    append::{self, AppendArgs},
    axes::{self, AxesArgs},
    build::{self, BuildArgs},
    run::{self, RunArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "xyz-grid", about = "Build and run X/Y/Z grid prompt test matrices")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample captions from an image directory into a fresh corpus.
    Build(BuildArgs),
    /// Append one hand-written record to a corpus.
    Append(AppendArgs),
    /// Execute a corpus against the synthesis backend.
    Run(RunArgs),
    /// List the accepted axis types and their wire indices.
    Axes(AxesArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => build::run(&args),
        Command::Append(args) => append::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Axes(args) => axes::run(&args),
    }
}
