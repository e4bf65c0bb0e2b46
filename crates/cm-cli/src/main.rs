//! cm - community admin session CLI
//!
//! Signs in to a community, shows the restored session and switches the
//! active community. Output is JSON on stdout; logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Sign in
//! cm login --token tok-A --tenant tenant-1
//!
//! # Show the re-validated session
//! cm status --pretty
//!
//! # Sign out
//! cm logout
//! ```

use cm_cli::{Cli, CliResult, build_manager, logger, render, run};
use cm_config::Config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = e.recovery_hint() {
                eprintln!();
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> CliResult<String> {
    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.identity.base_url = base_url;
    }
    config.validate()?;

    let log_file = config.logging.file.as_ref().map(PathBuf::from);
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;
    config.log_summary();

    let manager = build_manager(&config)?;
    let snapshot = run(&cli.command, &manager).await?;

    render(&snapshot, cli.pretty)
}
