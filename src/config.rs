//! Configuration for normalization runs and output encoding.

use crate::error::Result;
use crate::models::StationKey;
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};

/// Which rows survive normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationSet {
    /// Keep every row, resolved or not
    #[default]
    All,
    /// Keep only rows keyed by a national air-quality network code
    Network,
}

impl StationSet {
    /// Whether a row with this key is kept
    pub fn accepts(&self, key: &StationKey) -> bool {
        match self {
            Self::All => true,
            Self::Network => key.is_network_station(),
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Settings for a normalization run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Post-filter applied to the assembled table
    pub station_set: StationSet,

    /// Parquet compression for written output
    pub compression: CompressionAlgorithm,
}

impl NormalizerConfig {
    /// Restrict output to national network stations
    pub fn network_only(mut self) -> Self {
        self.station_set = StationSet::Network;
        self
    }

    pub fn with_station_set(mut self, station_set: StationSet) -> Self {
        self.station_set = station_set;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Parse a configuration from TOML; absent keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
