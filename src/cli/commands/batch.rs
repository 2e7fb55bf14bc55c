//! Batch command: normalize many raw tables concurrently
//!
//! Files are processed on the blocking pool, at most `--jobs` at a time,
//! all sharing one registry and one region profile. A failure in one file
//! is reported and counted; it does not stop the others.

use super::shared::{FileJob, FileOutcome, RunSummary, build_job, print_outcome, setup_logging};
use crate::cli::args::BatchArgs;
use crate::output::{OutputFormat, output_path_for};
use anyhow::{Context, Result, bail};
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{error, info, warn};

/// Run the batch command
pub async fn run_batch(args: BatchArgs) -> Result<RunSummary> {
    setup_logging(&args.common)?;
    let start = Instant::now();

    let inputs = expand_inputs(&args.inputs)?;
    if inputs.is_empty() {
        bail!("No input files matched {:?}", args.inputs);
    }

    let job = build_job(&args.common, &args.profile, &args.run)?;
    let jobs = args.jobs();
    let planned = plan_outputs(inputs, &args.output_dir, job.format)?;

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    println!(
        "{} {} files ({}, {} concurrent)",
        "Normalizing".bright_yellow(),
        planned.len(),
        job.profile.name(),
        jobs
    );
    info!(
        "Batch of {} files with region '{}' into {}",
        planned.len(),
        job.profile.name(),
        args.output_dir.display()
    );

    let progress = create_progress_bar(planned.len() as u64);
    let outcomes = normalize_all(planned, &job, jobs, &progress).await;
    progress.finish_and_clear();

    let mut summary = RunSummary::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                print_outcome(&outcome);
                summary.record(&outcome);
            }
            Err(e) => {
                println!("  {} {}: {:#}", "✗".bright_red(), input.display(), e);
                summary.files_failed += 1;
            }
        }
    }

    summary.processing_time = start.elapsed();
    summary.print();
    Ok(summary)
}

/// Pair every input with its output path under `output_dir`
///
/// # Errors
/// Fails before anything is written when two inputs share a file stem and
/// would therefore be written to the same output file.
pub fn plan_outputs(
    inputs: Vec<PathBuf>,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut planned = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = output_path_for(&input, output_dir, format);
        if let Some(first) = claimed.get(&output) {
            bail!(
                "{} and {} would both be written to {}; rename one input or run them in separate batches",
                first.display(),
                input.display(),
                output.display()
            );
        }
        claimed.insert(output.clone(), input.clone());
        planned.push((input, output));
    }

    Ok(planned)
}

/// Normalize every (input, output) pair, at most `jobs` at a time, in completion order
pub async fn normalize_all(
    planned: Vec<(PathBuf, PathBuf)>,
    job: &FileJob,
    jobs: usize,
    progress: &ProgressBar,
) -> Vec<(PathBuf, Result<FileOutcome>)> {
    stream::iter(planned)
        .map(|(input, output)| {
            let job = job.clone();
            let progress = progress.clone();
            async move {
                let task_input = input.clone();
                let result = task::spawn_blocking(move || job.process(&task_input, &output))
                    .await
                    .context("Normalization task panicked")
                    .and_then(|r| r.map_err(anyhow::Error::from));

                if let Err(e) = &result {
                    error!("Failed to normalize {}: {:#}", input.display(), e);
                }
                progress.inc(1);
                (input, result)
            }
        })
        .buffer_unordered(jobs.max(1))
        .collect()
        .await
}

/// Expand glob patterns and plain paths into a sorted, de-duplicated file list
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let matches = glob::glob(pattern)
            .with_context(|| format!("Invalid input pattern '{}'", pattern))?;

        let mut matched = 0;
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                    matched += 1;
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path: {}", e),
            }
        }
        if matched == 0 {
            warn!("Pattern '{}' matched no files", pattern);
        }
    }

    Ok(files.into_iter().collect())
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(style.progress_chars("#>-"));
    }
    progress
}
