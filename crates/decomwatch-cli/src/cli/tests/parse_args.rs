use super::parse;
use crate::cli::{Cli, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_alias_only() {
    let cli = parse(&["decomwatch", "myminio"]);
    assert_eq!(cli.alias.as_deref(), Some("myminio"));
    assert!(cli.config_dir.is_none());
    assert!(!cli.watch);
    assert_eq!(cli.format, OutputFormat::Text);
    assert!(cli.input.is_none());
}

#[test]
fn cli_parse_config_dir_and_watch() {
    let cli = parse(&["decomwatch", "--config-dir", "/etc/mc", "--watch", "prod"]);
    assert_eq!(cli.alias.as_deref(), Some("prod"));
    assert_eq!(cli.config_dir, Some(PathBuf::from("/etc/mc")));
    assert!(cli.watch);
}

#[test]
fn cli_parse_short_watch() {
    assert!(parse(&["decomwatch", "-w", "prod"]).watch);
}

#[test]
fn cli_parse_json_format() {
    let cli = parse(&["decomwatch", "--format", "json", "prod"]);
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn cli_parse_input_without_alias() {
    let cli = parse(&["decomwatch", "--input", "pools.json"]);
    assert!(cli.alias.is_none());
    assert_eq!(cli.input, Some(PathBuf::from("pools.json")));
}

#[test]
fn cli_requires_alias_or_input() {
    assert!(Cli::try_parse_from(["decomwatch"]).is_err());
}

#[test]
fn cli_rejects_alias_with_input() {
    assert!(Cli::try_parse_from(["decomwatch", "--input", "pools.json", "prod"]).is_err());
}

#[test]
fn cli_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["decomwatch", "--format", "yaml", "prod"]).is_err());
}

#[test]
fn cli_rejects_extra_positional() {
    assert!(Cli::try_parse_from(["decomwatch", "a", "b"]).is_err());
}
