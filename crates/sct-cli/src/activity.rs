//! # Activity Subcommand
//!
//! Fetches every authoring activity touching the given concepts from the
//! traceability service and prints them as a JSON array.
//!
//! Identifiers that are not valid concept ids are rejected before any
//! request is made.
//!
//! ## Connection
//!
//! `--traceability-url` and `--cookie` override `TRACEABILITY_URL` and
//! `TRACEABILITY_COOKIE`. Timeout and retry settings come from the
//! environment only (see [`TraceabilityConfig::from_env`]).

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use sct_client::{ActivityType, TraceabilityClient, TraceabilityConfig};
use sct_core::{ComponentType, Sctid};

/// Arguments for the `sctid activity` subcommand.
#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// Concept to report on. Repeat for several concepts.
    #[arg(long = "concept", value_name = "ID", required = true, num_args = 1..)]
    pub concepts: Vec<String>,

    /// Activity type to filter on (e.g. CONTENT_CHANGE, promotion).
    #[arg(long = "type", value_name = "TYPE", default_value = "CONTENT_CHANGE")]
    pub activity_type: ActivityType,

    /// Only activities whose commit comment matches this filter.
    #[arg(long, value_name = "TEXT")]
    pub comment_filter: Option<String>,

    /// Traceability service root.
    #[arg(long, value_name = "URL")]
    pub traceability_url: Option<Url>,

    /// Session cookie sent with every request.
    #[arg(long, value_name = "COOKIE")]
    pub cookie: Option<String>,
}

/// Execute the activity subcommand.
pub fn run_activity(args: &ActivityArgs) -> Result<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(activity_to(args, &mut std::io::stdout().lock()))
}

/// Fetch and print into `out`. Exits 1 if any identifier is not a concept.
pub async fn activity_to(args: &ActivityArgs, out: &mut impl Write) -> Result<u8> {
    let Some(concepts) = parse_concepts(&args.concepts) else {
        return Ok(1);
    };

    let client = TraceabilityClient::new(resolve_config(args)?)?;
    let activities = client
        .concept_activity(&concepts, args.comment_filter.as_deref(), args.activity_type)
        .await
        .context("traceability lookup failed")?;
    tracing::info!(
        concepts = concepts.len(),
        activities = activities.len(),
        "fetched activity"
    );

    serde_json::to_writer_pretty(&mut *out, &activities)?;
    writeln!(out)?;
    Ok(0)
}

/// Parse every argument as a concept id, logging each rejection.
fn parse_concepts(ids: &[String]) -> Option<Vec<Sctid>> {
    let mut concepts = Vec::with_capacity(ids.len());
    let mut rejected = 0usize;
    for id in ids {
        match Sctid::parse_as(id.as_str(), ComponentType::Concept) {
            Ok(sctid) => concepts.push(sctid),
            Err(e) => {
                rejected += 1;
                tracing::error!(%id, "not a concept identifier: {e}");
            }
        }
    }
    (rejected == 0).then_some(concepts)
}

fn resolve_config(args: &ActivityArgs) -> Result<TraceabilityConfig> {
    let mut config = match &args.cookie {
        Some(cookie) => TraceabilityConfig::with_cookie(cookie.as_str()),
        None => TraceabilityConfig::from_env(),
    }
    .context("traceability service is not configured")?;
    if let Some(url) = &args.traceability_url {
        config.base_url = url.clone();
    }
    Ok(config)
}
