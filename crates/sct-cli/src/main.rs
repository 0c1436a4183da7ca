//! # sctid CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sct_cli::activity::{run_activity, ActivityArgs};
use sct_cli::check::{run_check, CheckArgs};
use sct_cli::classify::{run_classify, ClassifyArgs};
use sct_cli::upload::{run_upload, UploadArgs};

/// SNOMED CT identifier toolkit.
///
/// Classifies and validates SCTIDs, looks up authoring activity in the
/// traceability service, and uploads release files to the object store.
#[derive(Parser, Debug)]
#[command(name = "sctid", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the component type of each identifier.
    Classify(ClassifyArgs),

    /// Validate identifiers, optionally requiring a component type.
    Check(CheckArgs),

    /// Fetch authoring activity for concepts from the traceability service.
    Activity(ActivityArgs),

    /// Upload a file or standard input to the object store.
    Upload(UploadArgs),
}

/// Exit code for configuration, network and I/O failures.
const OPERATIONAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| verbosity_filter(cli.verbose));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sctid starting");

    let result = match &cli.command {
        Commands::Classify(args) => run_classify(args),
        Commands::Check(args) => run_check(args),
        Commands::Activity(args) => run_activity(args),
        Commands::Upload(args) => run_upload(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(OPERATIONAL_FAILURE)
        }
    }
}

fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sct_cli::check::ExpectedType;
    use sct_client::ActivityType;

    #[test]
    fn cli_parse_classify() {
        let cli = Cli::try_parse_from(["sctid", "classify", "138875005", "100014"]).unwrap();
        match cli.command {
            Commands::Classify(args) => assert_eq!(args.ids, ["138875005", "100014"]),
            other => panic!("expected classify, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_classify_requires_ids() {
        assert!(Cli::try_parse_from(["sctid", "classify"]).is_err());
    }

    #[test]
    fn cli_parse_check_with_type_and_explain() {
        let cli = Cli::try_parse_from([
            "sctid", "check", "--type", "description", "--explain", "100014",
        ])
        .unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.expected, Some(ExpectedType::Description));
            assert!(args.explain);
            assert_eq!(args.ids, ["100014"]);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_check_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["sctid", "check", "--type", "refset", "100014"]).is_err());
    }

    #[test]
    fn cli_parse_activity_defaults() {
        let cli = Cli::try_parse_from(["sctid", "activity", "--concept", "138875005"]).unwrap();
        if let Commands::Activity(args) = cli.command {
            assert_eq!(args.concepts, ["138875005"]);
            assert_eq!(args.activity_type, ActivityType::ContentChange);
            assert!(args.comment_filter.is_none());
            assert!(args.cookie.is_none());
        } else {
            panic!("expected activity");
        }
    }

    #[test]
    fn cli_parse_activity_repeated_concepts_and_type() {
        let cli = Cli::try_parse_from([
            "sctid",
            "activity",
            "--concept",
            "138875005",
            "--concept",
            "404684003",
            "--type",
            "promotion",
            "--comment-filter",
            "INFRA-1",
        ])
        .unwrap();
        if let Commands::Activity(args) = cli.command {
            assert_eq!(args.concepts, ["138875005", "404684003"]);
            assert_eq!(args.activity_type, ActivityType::Promotion);
            assert_eq!(args.comment_filter.as_deref(), Some("INFRA-1"));
        } else {
            panic!("expected activity");
        }
    }

    #[test]
    fn cli_parse_upload_tags_and_meta() {
        let cli = Cli::try_parse_from([
            "sctid",
            "upload",
            "--bucket",
            "builds",
            "--key",
            "int/manifest.xml",
            "--tag",
            "stage=build",
            "--meta",
            "release=20240101",
            "-",
        ])
        .unwrap();
        if let Commands::Upload(args) = cli.command {
            assert_eq!(args.bucket, "builds");
            assert_eq!(args.file, std::path::PathBuf::from("-"));
            assert_eq!(args.tags, [sct_storage::Tag::new("stage", "build")]);
            assert_eq!(args.metadata, [("release".to_string(), "20240101".to_string())]);
        } else {
            panic!("expected upload");
        }
    }

    #[test]
    fn cli_parse_upload_rejects_malformed_tag() {
        assert!(Cli::try_parse_from([
            "sctid", "upload", "--bucket", "b1b", "--key", "k", "--tag", "novalue", "f",
        ])
        .is_err());
    }

    #[test]
    fn cli_parse_verbose_is_global() {
        let cli = Cli::try_parse_from(["sctid", "classify", "-vv", "100014"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
