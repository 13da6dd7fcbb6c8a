//! Terminal driver for gridpath.
//!
//! Run: cargo run --bin gridpath -- --animate
//!      cargo run --bin gridpath -- --random --seed 7 --size 24
//!      RUST_LOG=debug cargo run --bin gridpath -- --layout city.json --format json

use std::io;
use std::process::ExitCode;

use clap::Parser;
use gridpath_demo::{Cli, exit_code, run};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli, &mut io::stdout()) {
        Ok(report) => exit_code(&report.outcome),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // `try_init` also bridges the `log` records emitted by the library crates.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
