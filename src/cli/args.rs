//! Command-line argument definitions for airwatch
//!
//! Defines the CLI using the clap derive API. Every subcommand flattens the
//! shared logging and registry options so they can appear after the
//! subcommand name.

use crate::config::{CompressionAlgorithm, StationSet};
use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_DIR};
use crate::output::OutputFormat;
use chrono::{DateTime, FixedOffset};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the air-quality normalizer
///
/// Normalizes hourly air-quality tables published by Japanese regional
/// authorities into one schema: national station codes, fixed measurement
/// kinds and fixed units.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "airwatch",
    version,
    about = "Normalize Japanese regional air-quality tables into one canonical schema",
    long_about = "Reads raw hourly tables exported from regional air-quality monitoring sites \
                  (Chiba, Kanagawa, Tokyo, Yamanashi, Shizuoka, JMA AMeDAS or any region described \
                  in a TOML profile), resolves station names to national station codes, converts \
                  every measurement to its canonical unit and writes Parquet or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize a single raw table
    Normalize(NormalizeArgs),
    /// Normalize many raw tables concurrently
    Batch(BatchArgs),
    /// Inspect the station registry
    Stations(StationsArgs),
    /// List built-in region profiles or show one in detail
    Regions(RegionsArgs),
}

/// Logging and registry options shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,

    /// External station table with the national column layout
    ///
    /// The bundled table covers the stations the built-in regions need. Point
    /// this at the full national table to resolve everything else.
    #[arg(
        long = "station-table",
        value_name = "CSV",
        help = "Station table CSV to use instead of the bundled one"
    )]
    pub station_table: Option<PathBuf>,
}

impl CommonArgs {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Region selection: a built-in profile name or a TOML profile file
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct ProfileArgs {
    /// Built-in region profile
    #[arg(
        short = 'r',
        long = "region",
        value_name = "NAME",
        conflicts_with = "profile",
        help = "Built-in region profile (amedas, chiba, kanagawa, shizuoka, tokyo, yamanashi)"
    )]
    pub region: Option<String>,

    /// Region profile TOML file
    #[arg(
        short = 'p',
        long = "profile",
        value_name = "FILE",
        help = "Region profile TOML file"
    )]
    pub profile: Option<PathBuf>,
}

/// Options controlling how tables are normalized and written
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct RunArgs {
    /// Normalizer configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Normalizer configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Keep only stations of the national air-quality network
    #[arg(
        long = "network-only",
        help = "Drop rows that did not resolve to a national station code"
    )]
    pub network_only: bool,

    /// Output file format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "parquet",
        help = "Output file format"
    )]
    pub format: OutputFormat,

    /// Parquet compression
    #[arg(
        long = "compression",
        value_enum,
        help = "Parquet compression (overrides the configuration file)"
    )]
    pub compression: Option<CompressionAlgorithm>,

    /// Hour the table describes
    #[arg(
        long = "observed-at",
        value_name = "TIME",
        value_parser = parse_observed_at,
        help = "Hour the table describes, e.g. 2024-08-08T23:00+09:00"
    )]
    pub observed_at: Option<DateTime<FixedOffset>>,
}

impl RunArgs {
    /// Station set requested on the command line, if any
    pub fn station_set(&self) -> Option<StationSet> {
        self.network_only.then_some(StationSet::Network)
    }
}

/// Arguments for the normalize command
#[derive(Debug, Clone, Parser)]
pub struct NormalizeArgs {
    /// Raw table CSV
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file; defaults to the input name under the default output directory
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file path"
    )]
    pub output: Option<PathBuf>,

    /// List every unresolved station label after the summary
    #[arg(long = "show-unresolved", help = "List unresolved station labels")]
    pub show_unresolved: bool,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Raw table CSV files or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Directory for normalized output files
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory for normalized output files"
    )]
    pub output_dir: PathBuf,

    /// Number of files normalized concurrently
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "COUNT",
        help = "Files normalized concurrently (default: number of CPUs)"
    )]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl BatchArgs {
    /// Effective concurrency
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Arguments for the stations command
#[derive(Debug, Clone, Parser)]
pub struct StationsArgs {
    /// Show stations whose name contains this text
    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help = "Find stations by full or short name"
    )]
    pub search: Option<String>,

    /// Show one station by code
    #[arg(long = "code", value_name = "CODE", help = "Show one station by code")]
    pub code: Option<u32>,

    /// Filter stations by bounding box
    #[arg(
        long = "bbox",
        value_name = "BBOX",
        value_parser = parse_bbox,
        help = "Filter stations by bounding box (min_lat,max_lat,min_lon,max_lon)"
    )]
    pub bbox: Option<BoundingBox>,

    /// List names shared by more than one station
    #[arg(long = "ambiguous", help = "List names shared by several stations")]
    pub ambiguous: bool,

    /// Resolve a raw label as a region would
    #[arg(
        long = "resolve",
        value_name = "LABEL",
        help = "Resolve a raw station label (uses --region aliases when given)"
    )]
    pub resolve: Option<String>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the regions command
#[derive(Debug, Clone, Parser)]
pub struct RegionsArgs {
    /// Region to describe; lists all built-in regions when omitted
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Describe a TOML profile instead of a built-in one
    #[arg(
        short = 'p',
        long = "profile",
        value_name = "FILE",
        conflicts_with = "name",
        help = "Region profile TOML file"
    )]
    pub profile: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Geographic bounding box in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Parse `min_lat,max_lat,min_lon,max_lon`
pub fn parse_bbox(s: &str) -> std::result::Result<BoundingBox, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid bounding box '{}': {}", s, e))?;

    let [min_lat, max_lat, min_lon, max_lon] = parts[..] else {
        return Err(format!(
            "bounding box needs four values (min_lat,max_lat,min_lon,max_lon), got {}",
            parts.len()
        ));
    };
    if min_lat > max_lat || min_lon > max_lon {
        return Err(format!("bounding box '{}' has min greater than max", s));
    }

    Ok(BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    })
}

/// Parse an RFC 3339 timestamp; seconds may be omitted
pub fn parse_observed_at(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z"))
        .map_err(|e| format!("invalid timestamp '{}': {}", s, e))
}
