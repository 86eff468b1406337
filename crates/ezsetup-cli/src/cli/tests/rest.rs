//! Tests for pin, completions and global options.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use clap_complete::Shell;

#[test]
fn cli_parse_pin() {
    match parse(&["ezsetup", "pin", "https://example.com/pkg.tar.gz"]) {
        CliCommand::Pin { url } => assert_eq!(url, "https://example.com/pkg.tar.gz"),
        _ => panic!("expected Pin"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["ezsetup", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_global_options_default_off() {
    let cli = Cli::try_parse_from(["ezsetup", "install", "https://x/p.tar"]).unwrap();
    assert!(cli.config.is_none());
    assert!(!cli.keep_workdir);
}

#[test]
fn cli_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ezsetup",
        "install",
        "https://x/p.tar",
        "--keep-workdir",
        "--config",
        "/etc/ezsetup.toml",
    ])
    .unwrap();
    assert!(cli.keep_workdir);
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/ezsetup.toml"))
    );
}

#[test]
fn cli_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["ezsetup", "frobnicate"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
