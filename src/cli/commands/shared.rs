//! Shared components for CLI commands
//!
//! Logging setup, registry and profile loading, and the single-file
//! normalize-and-write step used by both `normalize` and `batch`.

use crate::cli::args::{CommonArgs, ProfileArgs, RunArgs};
use crate::config::NormalizerConfig;
use crate::models::CanonicalTable;
use crate::normalizer::{MeasurementNormalizer, NormalizationReport};
use crate::output::{self, OutputFormat};
use crate::raw::read_raw_csv;
use crate::regions::{self, RegionProfile};
use crate::station_registry::StationRegistry;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Totals across every file a command touched
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files normalized and written
    pub files_processed: usize,
    /// Files that failed to normalize or write
    pub files_failed: usize,
    /// Rows written across all outputs
    pub rows_written: usize,
    /// Unresolved station labels across all files
    pub unresolved: usize,
    /// Unresolved labels not acknowledged by the region's aliases
    pub unexpected_unresolved: usize,
    /// Wall-clock time for the command
    pub processing_time: Duration,
}

impl RunSummary {
    /// Fold one file's report into the totals
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        self.rows_written += outcome.rows_written;
        self.unresolved += outcome.report.unresolved.len();
        self.unexpected_unresolved += outcome.report.unexpected_unresolved().count();
    }

    pub fn is_success(&self) -> bool {
        self.files_failed == 0
    }

    /// Print a colored summary to stdout
    pub fn print(&self) {
        println!("\n{}", "Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            self.files_processed
        );
        if self.files_failed > 0 {
            println!(
                "  {} {}",
                "Files failed:".bright_red(),
                self.files_failed.to_string().bright_red()
            );
        }
        println!("  {} {}", "Rows written:".bright_cyan(), self.rows_written);
        let unresolved = format!(
            "{} ({} unexpected)",
            self.unresolved, self.unexpected_unresolved
        );
        if self.unexpected_unresolved > 0 {
            println!("  {} {}", "Unresolved:".bright_cyan(), unresolved.yellow());
        } else {
            println!("  {} {}", "Unresolved:".bright_cyan(), unresolved);
        }
        println!(
            "  {} {:.2}s",
            "Elapsed:".bright_cyan(),
            self.processing_time.as_secs_f64()
        );
    }
}

/// Result of normalizing and writing one raw file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows_written: usize,
    pub report: NormalizationReport,
}

/// Everything needed to process one file, shareable across tasks
#[derive(Debug, Clone)]
pub struct FileJob {
    pub registry: Arc<StationRegistry>,
    pub profile: Arc<RegionProfile>,
    pub config: NormalizerConfig,
    pub format: OutputFormat,
    pub observed_at: Option<DateTime<FixedOffset>>,
}

impl FileJob {
    /// Read, normalize and write one raw table
    pub fn process(&self, input: &Path, output: &Path) -> crate::Result<FileOutcome> {
        let raw = read_raw_csv(input)?;
        let normalizer = MeasurementNormalizer::with_config(&self.registry, self.config.clone());
        let (table, report) = normalizer.normalize(&raw, &self.profile)?;
        let table = self.stamp(table);

        let rows_written =
            output::write_table(&table, output, self.format, self.config.compression)?;
        debug!(
            "{} -> {} ({} rows)",
            input.display(),
            output.display(),
            rows_written
        );

        Ok(FileOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            rows_written,
            report,
        })
    }

    fn stamp(&self, table: CanonicalTable) -> CanonicalTable {
        match self.observed_at {
            Some(observed_at) => table.with_observed_at(observed_at),
            None => table,
        }
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(common: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("airwatch={}", log_level)));

    if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the bundled station registry, or an external table when requested
pub fn load_registry(common: &CommonArgs) -> Result<Arc<StationRegistry>> {
    let start = Instant::now();
    let registry = match &common.station_table {
        Some(path) => {
            let (registry, stats) = StationRegistry::from_csv_path(path)
                .with_context(|| format!("Failed to load station table {}", path.display()))?;
            info!("{}", stats.summary());
            registry
        }
        None => StationRegistry::load().context("Failed to load bundled station table")?,
    };
    debug!("Registry ready in {:.3}s", start.elapsed().as_secs_f64());
    Ok(Arc::new(registry))
}

/// Resolve `--region` / `--profile` into a region profile
pub fn load_profile(args: &ProfileArgs) -> Result<RegionProfile> {
    match (&args.region, &args.profile) {
        (Some(name), None) => regions::builtin(name).with_context(|| {
            format!(
                "Unknown region '{}'. Built-in regions: {}",
                name,
                regions::BUILTIN_REGIONS.join(", ")
            )
        }),
        (None, Some(path)) => RegionProfile::from_toml_file(path)
            .with_context(|| format!("Failed to load region profile {}", path.display())),
        (Some(_), Some(_)) => bail!("--region and --profile cannot be used together"),
        (None, None) => bail!(
            "A region is required: use --region <NAME> ({}) or --profile <FILE>",
            regions::BUILTIN_REGIONS.join(", ")
        ),
    }
}

/// Build the normalizer configuration: file first, then command-line overrides
pub fn load_config(run: &RunArgs) -> Result<NormalizerConfig> {
    let mut config = match &run.config_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            NormalizerConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => NormalizerConfig::default(),
    };

    if let Some(station_set) = run.station_set() {
        config = config.with_station_set(station_set);
    }
    if let Some(compression) = run.compression {
        config = config.with_compression(compression);
    }
    Ok(config)
}

/// Build a file job from parsed arguments
pub fn build_job(common: &CommonArgs, profile: &ProfileArgs, run: &RunArgs) -> Result<FileJob> {
    Ok(FileJob {
        registry: load_registry(common)?,
        profile: Arc::new(load_profile(profile)?),
        config: load_config(run)?,
        format: run.format,
        observed_at: run.observed_at,
    })
}

/// Print the per-file report lines
pub fn print_outcome(outcome: &FileOutcome) {
    let report = &outcome.report;
    let status = if report.is_clean() {
        "✓".bright_green()
    } else {
        "!".yellow()
    };
    println!(
        "  {} {} → {} ({} rows, {} resolved, {} unresolved)",
        status,
        outcome.input.display(),
        outcome.output.display().to_string().bright_white(),
        outcome.rows_written,
        report.resolved,
        report.unresolved.len()
    );
}
