//! # Check Subcommand
//!
//! Validates identifiers and prints `OK` or `FAIL` for each. With `--type`,
//! an identifier only passes if it is valid *and* of that component type.

use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};

use sct_core::{ComponentType, ValidationError};

/// Component type accepted by `--type`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    /// Partition digit 0.
    Concept,
    /// Partition digit 1.
    Description,
    /// Partition digit 2.
    Relationship,
}

impl From<ExpectedType> for ComponentType {
    fn from(t: ExpectedType) -> Self {
        match t {
            ExpectedType::Concept => ComponentType::Concept,
            ExpectedType::Description => ComponentType::Description,
            ExpectedType::Relationship => ComponentType::Relationship,
        }
    }
}

/// Arguments for the `sctid check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Require this component type.
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub expected: Option<ExpectedType>,

    /// Print the rejection reason after each failure.
    #[arg(long)]
    pub explain: bool,

    /// Identifiers to check.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    check_to(args, &mut std::io::stdout().lock())
}

/// Check into `out`. Exits 0 only if every identifier passes.
pub fn check_to(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let mut failed = 0usize;
    for id in &args.ids {
        match check_one(id, args.expected) {
            Ok(()) => writeln!(out, "OK\t{id}")?,
            Err(reason) => {
                failed += 1;
                if args.explain {
                    writeln!(out, "FAIL\t{id}\t{reason}")?;
                } else {
                    writeln!(out, "FAIL\t{id}")?;
                }
            }
        }
    }

    if failed > 0 {
        tracing::info!(failed, total = args.ids.len(), "identifiers rejected");
        Ok(1)
    } else {
        Ok(0)
    }
}

fn check_one(id: &str, expected: Option<ExpectedType>) -> Result<(), ValidationError> {
    match expected {
        Some(t) => sct_core::validate_as(id, t.into()),
        None => sct_core::diagnose(id).map(drop),
    }
}
