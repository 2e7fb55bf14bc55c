//! Normalize command: one raw table in, one canonical table out

use super::shared::{RunSummary, build_job, print_outcome, setup_logging};
use crate::cli::args::NormalizeArgs;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::output::output_path_for;
use crate::resolver::UnresolvedReason;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;
use tokio::task;

/// Run the normalize command
pub async fn run_normalize(args: NormalizeArgs) -> Result<RunSummary> {
    setup_logging(&args.common)?;
    let start = Instant::now();

    let job = build_job(&args.common, &args.profile, &args.run)?;
    let output = args.output.clone().unwrap_or_else(|| {
        output_path_for(&args.input, Path::new(DEFAULT_OUTPUT_DIR), job.format)
    });

    println!(
        "{} {} ({})",
        "Normalizing".bright_yellow(),
        args.input.display(),
        job.profile.name()
    );

    let input = args.input.clone();
    let outcome = task::spawn_blocking(move || job.process(&input, &output))
        .await
        .context("Normalization task panicked")?
        .with_context(|| format!("Failed to normalize {}", args.input.display()))?;

    print_outcome(&outcome);

    if args.show_unresolved && !outcome.report.unresolved.is_empty() {
        println!("\n{}", "Unresolved stations".bright_yellow());
        for unresolved in &outcome.report.unresolved {
            let reason = match &unresolved.reason {
                UnresolvedReason::NotFound => "not found".to_string(),
                UnresolvedReason::Ambiguous { candidates } => {
                    format!("ambiguous: {:?}", candidates)
                }
            };
            let marker = if unresolved.acknowledged {
                "known".dimmed()
            } else {
                "new".yellow()
            };
            println!(
                "  [{}] {} (looked up as '{}'): {}",
                marker, unresolved.raw_label, unresolved.lookup_label, reason
            );
        }
    }

    let mut summary = RunSummary::default();
    summary.record(&outcome);
    summary.processing_time = start.elapsed();
    summary.print();

    Ok(summary)
}
