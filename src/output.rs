//! Canonical table output.
//!
//! Converts a [`CanonicalTable`] into a polars `DataFrame` with a fixed
//! column layout and writes it as Parquet or CSV:
//!
//! | column         | type    | content                                  |
//! |----------------|---------|------------------------------------------|
//! | `station`      | String  | station code digits, or the raw label     |
//! | `station_code` | Int64   | station code, null when unresolved        |
//! | `observed_at`  | String  | RFC 3339 hour, only when the table has one |
//! | `SO2` … `CODE` | Float64 | one column per reported kind              |

use crate::config::CompressionAlgorithm;
use crate::constants::{OBSERVED_AT_COLUMN, STATION_CODE_COLUMN, STATION_COLUMN};
use crate::error::Result;
use crate::models::CanonicalTable;
use clap::ValueEnum;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File format for written tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Apache Parquet
    #[default]
    Parquet,
    /// Comma-separated values with a header row
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

/// Build the output frame for a canonical table
pub fn to_dataframe(table: &CanonicalTable) -> Result<DataFrame> {
    let stations: Vec<String> = table.keys().map(|key| key.to_string()).collect();
    let codes: Vec<Option<i64>> = table.keys().map(|key| key.code().map(i64::from)).collect();

    let mut columns = vec![
        Column::new(STATION_COLUMN.into(), stations),
        Column::new(STATION_CODE_COLUMN.into(), codes),
    ];

    if let Some(observed_at) = table.observed_at() {
        let stamp = observed_at.to_rfc3339();
        columns.push(Column::new(
            OBSERVED_AT_COLUMN.into(),
            vec![stamp; table.len()],
        ));
    }

    for kind in table.kinds() {
        let values = table.column(*kind).unwrap_or_default();
        columns.push(Column::new(kind.name().into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Write a table as Parquet; returns the number of rows written
pub fn write_parquet(
    table: &CanonicalTable,
    path: &Path,
    compression: CompressionAlgorithm,
) -> Result<usize> {
    let mut df = to_dataframe(table)?;
    ensure_parent(path)?;

    let file = File::create(path)?;
    ParquetWriter::new(file)
        .with_compression(compression.to_polars_compression())
        .with_statistics(StatisticsOptions::full())
        .finish(&mut df)?;

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(df.height())
}

/// Write a table as CSV with a header row; returns the number of rows written
pub fn write_csv(table: &CanonicalTable, path: &Path) -> Result<usize> {
    let mut df = to_dataframe(table)?;
    ensure_parent(path)?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(df.height())
}

/// Write a table in the requested format
pub fn write_table(
    table: &CanonicalTable,
    path: &Path,
    format: OutputFormat,
    compression: CompressionAlgorithm,
) -> Result<usize> {
    match format {
        OutputFormat::Parquet => write_parquet(table, path, compression),
        OutputFormat::Csv => write_csv(table, path),
    }
}

/// Output path for an input file: same stem, new extension, under `output_dir`
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "normalized".to_string());
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
