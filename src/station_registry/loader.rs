//! Station table loading
//!
//! Reads the national station table (embedded, or an external CSV with the
//! same headers), converts degree/minute/second coordinates to decimal
//! degrees and builds the name indices. Any defect in the table is fatal.

use super::StationRegistry;
use crate::constants::{EMBEDDED_STATION_TABLE, SHORT_NAME_MAX_CHARS, station_columns};
use crate::error::{AirwatchError, Result};
use crate::models::StationRecord;
use polars::prelude::*;
use std::collections::hash_map::Entry;
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Statistics about a registry load
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Where the table came from ("embedded" or a file path)
    pub source: String,

    /// Data rows read from the table
    pub records_read: usize,

    /// Stations in the finished registry
    pub stations_loaded: usize,

    /// Time taken to parse and index the table
    pub load_duration: Duration,
}

impl LoadStats {
    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} stations from {} ({} rows) in {:.3}s",
            self.stations_loaded,
            self.source,
            self.records_read,
            self.load_duration.as_secs_f64()
        )
    }
}

impl StationRegistry {
    /// Load the embedded national station table
    ///
    /// # Errors
    /// * `AirwatchError::DuplicateStationCode` if two rows share a code
    /// * `AirwatchError::InvalidStationTable` for unparseable rows
    pub fn load() -> Result<Self> {
        Self::load_with_stats().map(|(registry, _)| registry)
    }

    /// Load the embedded table and report loading statistics
    pub fn load_with_stats() -> Result<(Self, LoadStats)> {
        Self::from_csv_bytes(EMBEDDED_STATION_TABLE.as_bytes(), "embedded")
    }

    /// Load an external station table with the national column layout
    pub fn from_csv_path(path: &Path) -> Result<(Self, LoadStats)> {
        if !path.exists() {
            return Err(AirwatchError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path)?;
        Self::from_csv_bytes(&bytes, &path.display().to_string())
    }

    /// Parse a station table from CSV bytes
    pub fn from_csv_bytes(bytes: &[u8], source: &str) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();

        // Every column as text; numeric parsing is done per row with row-aware errors
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;

        let records = parse_station_frame(&df)?;
        let records_read = records.len();
        let registry = Self::from_records(records)?;

        let stats = LoadStats {
            source: source.to_string(),
            records_read,
            stations_loaded: registry.station_count(),
            load_duration: start_time.elapsed(),
        };
        info!("{}", stats.summary());

        Ok((registry, stats))
    }

    /// Build a registry from already-parsed records
    ///
    /// # Errors
    /// Returns `AirwatchError::DuplicateStationCode` on the first repeated code.
    pub fn from_records(records: Vec<StationRecord>) -> Result<Self> {
        let mut registry = Self::default();

        for record in records {
            let code = record.code;
            match registry.stations.entry(code) {
                Entry::Occupied(existing) => {
                    return Err(AirwatchError::DuplicateStationCode {
                        code,
                        first: existing.get().full_name.clone(),
                        second: record.full_name,
                    });
                }
                Entry::Vacant(slot) => {
                    // Blank names are never indexed
                    if !record.full_name.is_empty() {
                        registry
                            .by_full_name
                            .entry(record.full_name.clone())
                            .or_default()
                            .push(code);
                    }
                    if !record.short_name.is_empty() {
                        registry
                            .by_short_name
                            .entry(record.short_name.clone())
                            .or_default()
                            .push(code);
                    }
                    slot.insert(record);
                }
            }
        }

        debug!(
            "Indexed {} stations ({} full names, {} short names)",
            registry.stations.len(),
            registry.by_full_name.len(),
            registry.by_short_name.len()
        );
        Ok(registry)
    }
}

/// Convert a degree/minute/second triple to decimal degrees
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Text columns of the station table
struct StationColumns<'a> {
    full_name: &'a StringChunked,
    short_name: &'a StringChunked,
    code: &'a StringChunked,
    lon: [&'a StringChunked; 3],
    lat: [&'a StringChunked; 3],
    elevation: Option<&'a StringChunked>,
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    let column = df.column(name).map_err(|_| {
        AirwatchError::configuration(format!("station table is missing column '{}'", name))
    })?;
    Ok(column.as_materialized_series().str()?)
}

/// Parse every row of the station table frame into records
pub fn parse_station_frame(df: &DataFrame) -> Result<Vec<StationRecord>> {
    use station_columns::*;

    let columns = StationColumns {
        full_name: text_column(df, FULL_NAME)?,
        short_name: text_column(df, SHORT_NAME)?,
        code: text_column(df, CODE)?,
        lon: [
            text_column(df, LON_DEG)?,
            text_column(df, LON_MIN)?,
            text_column(df, LON_SEC)?,
        ],
        lat: [
            text_column(df, LAT_DEG)?,
            text_column(df, LAT_MIN)?,
            text_column(df, LAT_SEC)?,
        ],
        elevation: text_column(df, ELEVATION).ok(),
    };

    (0..df.height())
        .map(|i| parse_station_row(&columns, i))
        .collect()
}

fn parse_station_row(columns: &StationColumns<'_>, i: usize) -> Result<StationRecord> {
    // Report rows 1-based, counting data rows only
    let row = i + 1;

    let full_name = columns
        .full_name
        .get(i)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AirwatchError::station_table(row, "empty station name"))?
        .to_string();

    let short_name = columns.short_name.get(i).unwrap_or_default().trim().to_string();
    if short_name.chars().count() > SHORT_NAME_MAX_CHARS {
        return Err(AirwatchError::station_table(
            row,
            format!(
                "short name '{}' exceeds {} characters",
                short_name, SHORT_NAME_MAX_CHARS
            ),
        ));
    }

    let code_text = columns.code.get(i).unwrap_or_default().trim();
    let code: u32 = code_text.parse().map_err(|_| {
        AirwatchError::station_table(row, format!("invalid station code '{}'", code_text))
    })?;

    let number = |column: &StringChunked, what: &str| -> Result<f64> {
        let text = column.get(i).unwrap_or_default().trim();
        text.parse::<f64>().map_err(|_| {
            AirwatchError::station_table(row, format!("invalid {} '{}' for {}", what, text, code))
        })
    };

    let longitude = dms_to_degrees(
        number(columns.lon[0], "longitude degrees")?,
        number(columns.lon[1], "longitude minutes")?,
        number(columns.lon[2], "longitude seconds")?,
    );
    let latitude = dms_to_degrees(
        number(columns.lat[0], "latitude degrees")?,
        number(columns.lat[1], "latitude minutes")?,
        number(columns.lat[2], "latitude seconds")?,
    );

    let elevation = match columns.elevation.and_then(|c| c.get(i)).map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(text.parse::<f64>().map_err(|_| {
            AirwatchError::station_table(row, format!("invalid elevation '{}'", text))
        })?),
    };

    Ok(StationRecord {
        code,
        full_name,
        short_name,
        longitude,
        latitude,
        elevation,
    })
}
