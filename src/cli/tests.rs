//! Unit tests for CLI parsing

#![allow(clippy::unwrap_used, clippy::panic)]

use crate::cli::{Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_config_command_with_flags() {
    let cli = Cli::try_parse_from([
        "attestation-gen",
        "config",
        "--type",
        "Payment",
        "--out-path",
        "out/config",
        "--abi-out-path",
        "out/abi",
    ])
    .unwrap();

    match cli.command {
        Commands::Config {
            attestation_type,
            out_path,
            abi_out_path,
        } => {
            assert_eq!(attestation_type.as_deref(), Some("Payment"));
            assert_eq!(out_path, Some(PathBuf::from("out/config")));
            assert_eq!(abi_out_path, Some(PathBuf::from("out/abi")));
        }
        _ => panic!("Expected Config command"),
    }
    assert_eq!(cli.root, PathBuf::from("."));
    assert!(cli.config.is_none());
}

#[test]
fn test_out_path_camel_case_alias() {
    let cli =
        Cli::try_parse_from(["attestation-gen", "ts-type", "--outPath", "types"]).unwrap();
    match cli.command {
        Commands::TsType {
            attestation_type,
            out_path,
        } => {
            assert!(attestation_type.is_none());
            assert_eq!(out_path, Some(PathBuf::from("types")));
        }
        _ => panic!("Expected TsType command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "attestation-gen",
        "server",
        "--root",
        "project",
        "--config",
        "gen.toml",
        "--force",
    ])
    .unwrap();
    assert_eq!(cli.root, PathBuf::from("project"));
    assert_eq!(cli.config, Some(PathBuf::from("gen.toml")));
    assert!(matches!(cli.command, Commands::Server { force: true, .. }));
}

#[test]
fn test_verifier_template_requires_type_and_source() {
    assert!(Cli::try_parse_from(["attestation-gen", "verifier-template", "--type", "Payment"])
        .is_err());

    let cli = Cli::try_parse_from([
        "attestation-gen",
        "verifier-template",
        "--type",
        "Payment",
        "--data-source",
        "BTC",
        "--clear",
    ])
    .unwrap();
    match cli.command {
        Commands::VerifierTemplate {
            attestation_type,
            data_source,
            clear,
        } => {
            assert_eq!(attestation_type, "Payment");
            assert_eq!(data_source, "BTC");
            assert!(clear);
        }
        _ => panic!("Expected VerifierTemplate command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["attestation-gen", "config"],
        vec!["attestation-gen", "dto", "--out-path", "dto"],
        vec!["attestation-gen", "ts-type", "-t", "Payment"],
        vec![
            "attestation-gen",
            "verification-contract",
            "--interface-out-path",
            "interfaces",
        ],
        vec!["attestation-gen", "temporary-contracts", "--type", "IPayment"],
        vec!["attestation-gen", "server"],
        vec![
            "attestation-gen",
            "verifier-template",
            "-t",
            "Payment",
            "-d",
            "DOGE",
        ],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["attestation-gen", "generate"]).is_err());
}
