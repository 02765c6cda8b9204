use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use floorcraft_cli::{ConsoleIo, Controller, telemetry};
use floorcraft_store::{OrderService, StorePaths};

/// Flooring-order estimator: per-date order ledgers with pricing, audit
/// trail, and export.
#[derive(Debug, Parser)]
#[command(name = "floorcraft", version)]
struct Args {
    /// Root directory holding data/, orders/, backup/ and audits/.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> ExitCode {
    telemetry::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let paths = StorePaths::new(&args.root);
    let service = OrderService::bootstrap(paths)
        .with_context(|| format!("could not start from root {}", args.root.display()))?;

    let mut controller = Controller::new(service, ConsoleIo::stdio());
    controller.run().context("session ended on a persistence failure")?;
    Ok(())
}
