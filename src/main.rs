use clap::Parser;
use std::process::ExitCode;

use license_check_node::cli::Cli;
use license_check_node::commands::run_cli;
use license_check_node::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    tracing::debug!(paths = cli.paths.len(), "license-check-node starting");

    match run_cli(&cli) {
        0 => ExitCode::SUCCESS,
        code => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    }
}
