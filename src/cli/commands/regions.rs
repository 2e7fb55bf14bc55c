//! Regions command: list or describe region profiles

use super::shared::{RunSummary, setup_logging};
use crate::cli::args::RegionsArgs;
use crate::regions::{self, RegionProfile, StationIndex};
use crate::resolver::AliasEntry;
use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;

/// Run the regions command
pub async fn run_regions(args: RegionsArgs) -> Result<RunSummary> {
    setup_logging(&args.common)?;
    let start = Instant::now();

    match (&args.name, &args.profile) {
        (Some(name), _) => describe(&regions::builtin(name).with_context(|| {
            format!(
                "Built-in regions: {}",
                regions::BUILTIN_REGIONS.join(", ")
            )
        })?),
        (None, Some(path)) => describe(
            &RegionProfile::from_toml_file(path)
                .with_context(|| format!("Failed to load region profile {}", path.display()))?,
        ),
        (None, None) => {
            println!("{}", "Built-in regions".bright_green().bold());
            for name in regions::BUILTIN_REGIONS {
                let profile = regions::builtin(name)?;
                let kinds: Vec<&str> = profile.kinds().iter().map(|k| k.name()).collect();
                println!(
                    "  {:<10} {} columns, {} aliases: {}",
                    name.bright_white(),
                    profile.columns().len(),
                    profile.aliases().len(),
                    kinds.join(" ")
                );
            }
        }
    }

    Ok(RunSummary {
        processing_time: start.elapsed(),
        ..RunSummary::default()
    })
}

fn describe(profile: &RegionProfile) {
    println!("{} {}", "Region".bright_green().bold(), profile.name());
    let index = match profile.index() {
        StationIndex::Resolve { column } => format!("'{}' (resolved by name)", column),
        StationIndex::Passthrough { column } => format!("'{}' (station codes)", column),
    };
    println!("  {} {}", "Station column:".bright_cyan(), index);

    println!("  {}", "Columns:".bright_cyan());
    for (label, spec) in profile.columns() {
        println!(
            "    {:<28} → {:<5} from {}",
            label,
            spec.kind().name(),
            spec.unit()
        );
    }

    println!(
        "  {} {}",
        "Aliases:".bright_cyan(),
        profile.aliases().len()
    );
    for (raw, entry) in profile.aliases().iter() {
        match entry {
            AliasEntry::Rename(target) => println!("    {} → {}", raw, target),
            AliasEntry::Acknowledged => println!("    {} {}", raw, "(known unresolved)".dimmed()),
        }
    }
}
