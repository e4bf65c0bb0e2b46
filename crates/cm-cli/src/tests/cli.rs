use crate::{Cli, Commands};

use clap::Parser;
use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_status_when_parse_then_status_command() {
    let result = Cli::try_parse_from(["cm", "status"]);

    assert_that!(result, ok(anything()));
    let cli = result.unwrap();
    assert_eq!(cli.command, Commands::Status);
    assert_that!(cli.pretty, eq(false));
    assert!(cli.base_url.is_none());
}

#[test]
fn given_login_flags_when_parse_then_token_and_tenant_captured() {
    let cli = Cli::try_parse_from(["cm", "login", "--token", "tok-A", "--tenant", "tenant-1"])
        .unwrap();

    assert_eq!(
        cli.command,
        Commands::Login {
            token: "tok-A".to_string(),
            tenant: "tenant-1".to_string(),
        }
    );
}

#[test]
fn given_login_without_tenant_when_parse_then_error() {
    let result = Cli::try_parse_from(["cm", "login", "--token", "tok-A"]);

    assert_that!(result, err(anything()));
}

#[test]
fn given_tenant_id_when_parse_then_positional_id() {
    let cli = Cli::try_parse_from(["cm", "tenant", "tenant-7"]).unwrap();

    assert_eq!(
        cli.command,
        Commands::Tenant {
            id: "tenant-7".to_string()
        }
    );
}

#[test]
fn given_global_flags_after_subcommand_when_parse_then_applied() {
    let cli = Cli::try_parse_from([
        "cm",
        "logout",
        "--pretty",
        "--base-url",
        "https://identity.example.com",
    ])
    .unwrap();

    assert_eq!(cli.command, Commands::Logout);
    assert_that!(cli.pretty, eq(true));
    assert_eq!(
        cli.base_url.as_deref(),
        Some("https://identity.example.com")
    );
}

#[test]
fn given_unknown_subcommand_when_parse_then_error() {
    let result = Cli::try_parse_from(["cm", "refresh"]);

    assert_that!(result, err(anything()));
}
