use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cm")]
#[command(about = "Community admin session CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Identity service URL (overrides config.toml and CM_IDENTITY_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
