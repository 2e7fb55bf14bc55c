//! Command implementations for the airwatch CLI
//!
//! Each subcommand lives in its own module. Commands return a
//! [`RunSummary`] that `main` uses to pick the exit code.

pub mod batch;
pub mod normalize;
pub mod regions;
pub mod shared;
pub mod stations;

pub use shared::RunSummary;

use crate::cli::args::Commands;
use anyhow::Result;

/// Dispatch to the subcommand handler
pub async fn run(command: Commands) -> Result<RunSummary> {
    match command {
        Commands::Normalize(args) => normalize::run_normalize(args).await,
        Commands::Batch(args) => batch::run_batch(args).await,
        Commands::Stations(args) => stations::run_stations(args).await,
        Commands::Regions(args) => regions::run_regions(args).await,
    }
}

