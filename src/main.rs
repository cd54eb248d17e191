// Entrypoint for the CLI application.
// Parses arguments, sets up logging on stderr and reports any error as a
// single line with exit status 1.

use clap::Parser as _;
use crossterm::style::Stylize;
use mochi_cli::cli::Cli;
use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(err) = mochi_cli::run(cli) {
        if std::io::stderr().is_terminal() {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(1);
    }
}
