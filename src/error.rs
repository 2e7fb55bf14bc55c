//! Error handling for normalization operations.
//!
//! Malformed cells and unresolved station labels are data-quality events and
//! never surface here. Everything in this enum is either an I/O failure or a
//! configuration defect that must abort the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirwatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Region profile parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown unit '{unit}'")]
    UnknownUnit { unit: String },

    #[error("Unit '{unit}' is not supported for {kind}")]
    UnsupportedUnit { kind: String, unit: String },

    #[error("Duplicate station code {code} in station table ('{first}' and '{second}')")]
    DuplicateStationCode {
        code: u32,
        first: String,
        second: String,
    },

    #[error("Invalid station table at row {row}: {reason}")]
    InvalidStationTable { row: usize, reason: String },

    #[error("Station column '{column}' not present in raw table")]
    MissingStationColumn { column: String },

    #[error("Raw table column '{column}' has {found} cells, expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown region '{name}'")]
    UnknownRegion { name: String },

    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AirwatchError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a station table error for a given data row (1-based)
    pub fn station_table(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStationTable {
            row,
            reason: reason.into(),
        }
    }

    /// True for errors caused by a misconfigured region profile or station table
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownUnit { .. }
                | Self::UnsupportedUnit { .. }
                | Self::DuplicateStationCode { .. }
                | Self::InvalidStationTable { .. }
                | Self::UnknownRegion { .. }
                | Self::Configuration { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AirwatchError>;
