//! # Classify Subcommand
//!
//! Prints one `<id>\t<TYPE>` line per argument. Invalid identifiers are
//! reported as `UNKNOWN`, matching [`sct_core::classify`].

use std::io::Write;

use anyhow::Result;
use clap::Args;

/// Arguments for the `sctid classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Identifiers to classify.
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs) -> Result<u8> {
    classify_to(args, &mut std::io::stdout().lock())
}

/// Classify into `out`. Exits 1 if any identifier is `UNKNOWN`.
pub fn classify_to(args: &ClassifyArgs, out: &mut impl Write) -> Result<u8> {
    let mut unknown = 0usize;
    for id in &args.ids {
        let component_type = sct_core::classify(id.as_str());
        if component_type == sct_core::ComponentType::Unknown {
            unknown += 1;
        }
        writeln!(out, "{id}\t{}", serde_name(component_type))?;
    }
    tracing::debug!(total = args.ids.len(), unknown, "classified identifiers");
    Ok(u8::from(unknown > 0))
}

fn serde_name(component_type: sct_core::ComponentType) -> &'static str {
    match component_type {
        sct_core::ComponentType::Concept => "CONCEPT",
        sct_core::ComponentType::Description => "DESCRIPTION",
        sct_core::ComponentType::Relationship => "RELATIONSHIP",
        sct_core::ComponentType::Unknown => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ids: &[&str]) -> (u8, String) {
        let args = ClassifyArgs {
            ids: ids.iter().map(|s| s.to_string()).collect(),
        };
        let mut out = Vec::new();
        let code = classify_to(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn classifies_each_type() {
        let (code, out) = run(&["138875005", "100014", "100022"]);
        assert_eq!(code, 0);
        assert_eq!(out, "138875005\tCONCEPT\n100014\tDESCRIPTION\n100022\tRELATIONSHIP\n");
    }

    #[test]
    fn unknown_sets_exit_code() {
        let (code, out) = run(&["138875005", "138875006"]);
        assert_eq!(code, 1);
        assert!(out.ends_with("138875006\tUNKNOWN\n"));
    }

    #[test]
    fn names_match_serde_representation() {
        for ct in [
            sct_core::ComponentType::Concept,
            sct_core::ComponentType::Description,
            sct_core::ComponentType::Relationship,
            sct_core::ComponentType::Unknown,
        ] {
            let json = serde_json::to_string(&ct).unwrap();
            assert_eq!(json, format!("\"{}\"", serde_name(ct)));
        }
    }
}
