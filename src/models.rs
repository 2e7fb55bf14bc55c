//! Core data structures for air-quality normalization.
//!
//! Defines measurement kinds, station records, the raw table handed over by
//! the per-region parsers, and the canonical table produced by the
//! normalizer.

use crate::constants::{STATION_CODE_MAX, STATION_CODE_MIN};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Measurement Kinds
// =============================================================================

/// Fixed set of measurement kinds, each stored in exactly one canonical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeasurementKind {
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO")]
    No,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "NOX")]
    Nox,
    #[serde(rename = "OX")]
    Ox,
    #[serde(rename = "SPM")]
    Spm,
    #[serde(rename = "PM25", alias = "PM2.5")]
    Pm25,
    #[serde(rename = "NMHC")]
    Nmhc,
    #[serde(rename = "CH4")]
    Ch4,
    #[serde(rename = "THC")]
    Thc,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "WD")]
    Wd,
    #[serde(rename = "WS")]
    Ws,
    #[serde(rename = "TEMP")]
    Temp,
    #[serde(rename = "HUM")]
    Hum,
    #[serde(rename = "LON")]
    Lon,
    #[serde(rename = "LAT")]
    Lat,
    #[serde(rename = "CODE")]
    Code,
}

impl MeasurementKind {
    /// Every kind, in canonical column order
    pub const ALL: [MeasurementKind; 18] = [
        Self::So2,
        Self::No,
        Self::No2,
        Self::Nox,
        Self::Ox,
        Self::Spm,
        Self::Pm25,
        Self::Nmhc,
        Self::Ch4,
        Self::Thc,
        Self::Co,
        Self::Wd,
        Self::Ws,
        Self::Temp,
        Self::Hum,
        Self::Lon,
        Self::Lat,
        Self::Code,
    ];

    /// Canonical column identifier for this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::So2 => "SO2",
            Self::No => "NO",
            Self::No2 => "NO2",
            Self::Nox => "NOX",
            Self::Ox => "OX",
            Self::Spm => "SPM",
            Self::Pm25 => "PM25",
            Self::Nmhc => "NMHC",
            Self::Ch4 => "CH4",
            Self::Thc => "THC",
            Self::Co => "CO",
            Self::Wd => "WD",
            Self::Ws => "WS",
            Self::Temp => "TEMP",
            Self::Hum => "HUM",
            Self::Lon => "LON",
            Self::Lat => "LAT",
            Self::Code => "CODE",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeasurementKind {
    type Err = crate::AirwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        let wanted = if wanted == "PM2.5" { "PM25".to_string() } else { wanted };
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                crate::AirwatchError::configuration(format!("unknown measurement kind '{}'", s))
            })
    }
}

// =============================================================================
// Stations
// =============================================================================

/// One station of the national monitoring network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// National station code, primary key
    pub code: u32,

    /// Official station name
    pub full_name: String,

    /// Abbreviated name (at most 8 characters)
    pub short_name: String,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Elevation above sea level in meters, when published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl StationRecord {
    /// Get station location as (latitude, longitude) tuple
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Index of a canonical row: a resolved station code, or the raw label kept
/// verbatim when resolution failed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StationKey {
    Code(u32),
    Label(String),
}

impl StationKey {
    /// Station code, if this key was resolved
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Label(_) => None,
        }
    }

    /// True when the key is an integer within the national station code range
    pub fn is_network_station(&self) -> bool {
        self.code()
            .is_some_and(|code| (STATION_CODE_MIN..=STATION_CODE_MAX).contains(&code))
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Label(label) => f.write_str(label),
        }
    }
}

// =============================================================================
// Raw Table
// =============================================================================

/// A single cell as delivered by a region parser
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Missing,
}

impl RawCell {
    /// Numeric coercion; anything that does not parse becomes `None`
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Missing => return None,
        };
        if value.is_nan() { None } else { Some(value) }
    }

    /// Text form of the cell, used for station labels and compass strings
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Missing => String::new(),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<&str>> for RawCell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

/// One raw column: source label plus cells in row order
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub label: String,
    pub cells: Vec<RawCell>,
}

/// Raw table keyed by region-specific column labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RawTable::insert_column`]
    pub fn with_column<I, C>(mut self, label: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<RawCell>,
    {
        self.insert_column(label, cells.into_iter().map(Into::into).collect());
        self
    }

    /// Add a column, replacing any existing column with the same label
    pub fn insert_column(&mut self, label: impl Into<String>, cells: Vec<RawCell>) {
        let label = label.into();
        match self.columns.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.cells = cells,
            None => self.columns.push(RawColumn { label, cells }),
        }
    }

    pub fn column(&self, label: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.label.as_str())
    }

    /// Number of rows, taken from the first column
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

// =============================================================================
// Canonical Table
// =============================================================================

/// One normalized station row
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub key: StationKey,
    pub values: BTreeMap<MeasurementKind, Option<f64>>,
}

impl CanonicalRow {
    /// Canonical value for a kind; `None` if missing or not reported
    pub fn value(&self, kind: MeasurementKind) -> Option<f64> {
        self.values.get(&kind).copied().flatten()
    }
}

/// Normalized table: one row per station key, one column per reported kind
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    kinds: Vec<MeasurementKind>,
    rows: Vec<CanonicalRow>,
    index: HashMap<StationKey, usize>,
    observed_at: Option<DateTime<FixedOffset>>,
}

impl CanonicalTable {
    /// Create an empty table reporting the given kinds
    pub fn new(mut kinds: Vec<MeasurementKind>) -> Self {
        kinds.sort();
        kinds.dedup();
        Self {
            kinds,
            ..Self::default()
        }
    }

    /// Stamp the table with the hour it describes
    pub fn with_observed_at(mut self, observed_at: DateTime<FixedOffset>) -> Self {
        self.observed_at = Some(observed_at);
        self
    }

    pub fn observed_at(&self) -> Option<DateTime<FixedOffset>> {
        self.observed_at
    }

    /// Append a row; returns false and leaves the table unchanged if the key
    /// is already present
    pub fn push_row(&mut self, row: CanonicalRow) -> bool {
        if self.index.contains_key(&row.key) {
            return false;
        }
        self.index.insert(row.key.clone(), self.rows.len());
        self.rows.push(row);
        true
    }

    /// Keep only rows matching the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(&CanonicalRow) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| keep(row));
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.key.clone(), i))
            .collect();
        before - self.rows.len()
    }

    /// Kinds reported by this table, in canonical order
    pub fn kinds(&self) -> &[MeasurementKind] {
        &self.kinds
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn get(&self, key: &StationKey) -> Option<&CanonicalRow> {
        self.index.get(key).map(|&i| &self.rows[i])
    }

    /// Single value lookup by station key and kind
    pub fn value(&self, key: &StationKey, kind: MeasurementKind) -> Option<f64> {
        self.get(key).and_then(|row| row.value(kind))
    }

    /// Full column in row order, or `None` if the kind is not reported
    pub fn column(&self, kind: MeasurementKind) -> Option<Vec<Option<f64>>> {
        if !self.kinds.contains(&kind) {
            return None;
        }
        Some(self.rows.iter().map(|row| row.value(kind)).collect())
    }

    pub fn keys(&self) -> impl Iterator<Item = &StationKey> {
        self.rows.iter().map(|row| &row.key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
