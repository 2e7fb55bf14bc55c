//! Stations command: inspect the station registry

use super::shared::{RunSummary, load_profile, load_registry, setup_logging};
use crate::cli::args::StationsArgs;
use crate::models::{StationKey, StationRecord};
use crate::resolver::{AliasTable, StationResolver};
use anyhow::{Result, bail};
use colored::*;
use std::time::Instant;

/// Run the stations command
pub async fn run_stations(args: StationsArgs) -> Result<RunSummary> {
    setup_logging(&args.common)?;
    let start = Instant::now();
    let registry = load_registry(&args.common)?;

    println!(
        "{} {} stations",
        "Registry:".bright_cyan(),
        registry.station_count()
    );

    if let Some(label) = &args.resolve {
        let aliases = if args.profile.region.is_some() || args.profile.profile.is_some() {
            load_profile(&args.profile)?.aliases().clone()
        } else {
            AliasTable::new()
        };
        let resolution = StationResolver::new(&registry).resolve(label, &aliases);
        match (&resolution.key, &resolution.unresolved) {
            (StationKey::Code(code), _) => {
                println!("{} {} → {}", "Resolved:".bright_green(), label, code);
                if let Some(station) = registry.get(*code) {
                    print_station(station);
                }
            }
            (_, Some(unresolved)) => {
                println!(
                    "{} {} (looked up as '{}'): {:?}{}",
                    "Unresolved:".yellow(),
                    unresolved.raw_label,
                    unresolved.lookup_label,
                    unresolved.reason,
                    if unresolved.acknowledged {
                        " [acknowledged]"
                    } else {
                        ""
                    }
                );
            }
            (StationKey::Label(_), None) => {}
        }
    }

    if let Some(code) = args.code {
        match registry.get(code) {
            Some(station) => print_station(station),
            None => bail!("No station with code {}", code),
        }
    }

    if let Some(pattern) = &args.search {
        let found = registry.find_stations_by_name(pattern);
        println!(
            "\n{} '{}': {} stations",
            "Search".bright_yellow(),
            pattern,
            found.len()
        );
        found.into_iter().for_each(print_station);
    }

    if let Some(bbox) = args.bbox {
        let found = registry.find_stations_in_region(
            bbox.min_lat,
            bbox.max_lat,
            bbox.min_lon,
            bbox.max_lon,
        );
        println!(
            "\n{} {} stations",
            "Bounding box:".bright_yellow(),
            found.len()
        );
        found.into_iter().for_each(print_station);
    }

    if args.ambiguous {
        let names = registry.ambiguous_names();
        println!(
            "\n{} {}",
            "Names shared by several stations:".bright_yellow(),
            names.len()
        );
        for (name, count) in names {
            let codes: Vec<String> = registry
                .lookup_by_name(name)
                .iter()
                .map(|s| s.code.to_string())
                .collect();
            println!("  {} ×{} [{}]", name, count, codes.join(", "));
        }
    }

    Ok(RunSummary {
        processing_time: start.elapsed(),
        ..RunSummary::default()
    })
}

fn print_station(station: &StationRecord) {
    let elevation = station
        .elevation
        .map_or_else(|| "-".to_string(), |e| format!("{:.0}m", e));
    println!(
        "  {} {} ({}) {:.4}N {:.4}E {}",
        station.code.to_string().bright_white(),
        station.full_name,
        station.short_name,
        station.latitude,
        station.longitude,
        elevation
    );
}
