//! Per-run statistics and data-quality observations

use crate::models::{MeasurementKind, StationKey};
use crate::resolver::UnresolvedStation;
use serde::Serialize;

/// What happened while normalizing one raw table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationReport {
    /// Region profile used
    pub region: String,

    /// Rows in the raw table
    pub rows_in: usize,

    /// Rows in the canonical table
    pub rows_out: usize,

    /// Rows whose label resolved to a station code
    pub resolved: usize,

    /// One observation per row whose label did not resolve
    pub unresolved: Vec<UnresolvedStation>,

    /// Keys seen more than once; only the first row was kept
    pub duplicate_keys: Vec<StationKey>,

    /// Rows removed by the station-set filter
    pub filtered: usize,

    /// Raw columns with no mapping in the region profile
    pub ignored_columns: Vec<String>,

    /// Kinds present in the output
    pub kinds: Vec<MeasurementKind>,
}

impl NormalizationReport {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    /// Unresolved labels the region's alias table does not already acknowledge
    pub fn unexpected_unresolved(&self) -> impl Iterator<Item = &UnresolvedStation> {
        self.unresolved.iter().filter(|u| !u.acknowledged)
    }

    /// Percentage of input rows resolved to a station code
    pub fn resolution_rate(&self) -> f64 {
        if self.rows_in == 0 {
            100.0
        } else {
            (self.resolved as f64 / self.rows_in as f64) * 100.0
        }
    }

    /// True when every unresolved label was acknowledged by the region
    pub fn is_clean(&self) -> bool {
        self.unexpected_unresolved().next().is_none() && self.duplicate_keys.is_empty()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows in, {} rows out, {} resolved ({:.1}%), {} unresolved ({} unexpected), {} duplicates, {} filtered, {} kinds",
            self.region,
            self.rows_in,
            self.rows_out,
            self.resolved,
            self.resolution_rate(),
            self.unresolved.len(),
            self.unexpected_unresolved().count(),
            self.duplicate_keys.len(),
            self.filtered,
            self.kinds.len()
        )
    }
}
