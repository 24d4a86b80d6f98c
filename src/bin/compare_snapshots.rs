//! Compares two company snapshots and prints the quality report as JSON.
//!
//! Usage:
//!   compare_snapshots <stage.json> <prod.json> [bucket_width]
//!   compare_snapshots            (loads both sides from the configured sources)

use anyhow::Context;
use rust_dq_api::config::Config;
use rust_dq_api::report::build_report;
use rust_dq_api::services::{parse_snapshot, QualityService};
use rust_dq_api::stats::DEFAULT_BUCKET_WIDTH;
use std::env;

fn read_snapshot(path: &str) -> anyhow::Result<Vec<rust_dq_api::models::CompanyRecord>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Reading {}", path))?;
    parse_snapshot(&raw).with_context(|| format!("Decoding {}", path))
}

/// Main entry point for the snapshot comparison utility.
///
/// With two file arguments the comparison runs offline. Without arguments the
/// staging and production snapshots come from the environment configuration.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let report = match args.as_slice() {
        [] => {
            let config = Config::from_env()?;
            QualityService::from_config(&config)?.report().await?
        }
        [stage, prod, rest @ ..] if rest.len() <= 1 => {
            let bucket_width = match rest.first() {
                Some(width) => width
                    .parse()
                    .with_context(|| format!("Invalid bucket width: {}", width))?,
                None => DEFAULT_BUCKET_WIDTH,
            };
            build_report(&read_snapshot(stage)?, &read_snapshot(prod)?, bucket_width)?
        }
        _ => anyhow::bail!("Usage: compare_snapshots [<stage.json> <prod.json> [bucket_width]]"),
    };

    eprintln!(
        "Compared {} companies, average correctness {:.2}% ({} staging / {} production unmatched)",
        report.stats.total_companies,
        report.stats.average_correctness,
        report.unmatched_stage,
        report.unmatched_prod
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
