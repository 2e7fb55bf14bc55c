//! airwatch
//!
//! Normalizes hourly air-quality tables published by Japanese regional
//! authorities into one canonical station/unit schema.
//!
//! This library provides tools for:
//! - Loading the national station table and indexing it by code and name
//! - Resolving free-text regional station labels to station codes
//! - Converting regional units into canonical units per measurement kind
//! - Describing regional table layouts as region profiles (built-in or TOML)
//! - Writing canonical tables as Parquet or CSV

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod output;
pub mod raw;
pub mod regions;
pub mod resolver;
pub mod station_registry;
pub mod units;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{CompressionAlgorithm, NormalizerConfig, StationSet};
pub use error::{AirwatchError, Result};
pub use models::{CanonicalRow, CanonicalTable, MeasurementKind, RawCell, RawTable, StationKey};
pub use normalizer::{MeasurementNormalizer, NormalizationReport};
pub use regions::RegionProfile;
pub use station_registry::StationRegistry;
