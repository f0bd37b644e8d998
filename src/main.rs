//! gap-score - Gap Score engine CLI

use clap::Parser;
use gap_score::cli::{self, Cli};
use gap_score::gate::EXIT_USAGE;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // Usage errors exit 2 from clap itself
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli::run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", console::style("Error:").red().bold().for_stderr(), e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}
