//! MeasurementNormalizer implementation

use super::report::NormalizationReport;
use crate::config::NormalizerConfig;
use crate::error::{AirwatchError, Result};
use crate::models::{CanonicalRow, CanonicalTable, MeasurementKind, RawCell, RawTable, StationKey};
use crate::regions::{RegionProfile, StationIndex};
use crate::resolver::StationResolver;
use crate::station_registry::StationRegistry;
use crate::units::{ConvertedSeries, convert};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Turns raw regional tables into canonical tables
///
/// Holds a shared reference to the station registry; a single registry can
/// serve any number of normalizers on any number of threads.
///
/// # Example
///
/// ```rust
/// use airwatch::models::{RawTable, StationKey};
/// use airwatch::normalizer::MeasurementNormalizer;
/// use airwatch::regions;
/// use airwatch::station_registry::StationRegistry;
///
/// # fn example() -> airwatch::Result<()> {
/// let registry = StationRegistry::shared()?;
/// let profile = regions::builtin("chiba")?;
/// let raw = RawTable::new()
///     .with_column("測定局", ["野田宮崎"])
///     .with_column("SO2 ppm", ["0.002"]);
///
/// let (table, report) = MeasurementNormalizer::new(registry).normalize(&raw, &profile)?;
/// assert_eq!(table.keys().next(), Some(&StationKey::Code(14010010)));
/// assert_eq!(report.resolved, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MeasurementNormalizer<'a> {
    registry: &'a StationRegistry,
    config: NormalizerConfig,
}

impl<'a> MeasurementNormalizer<'a> {
    pub fn new(registry: &'a StationRegistry) -> Self {
        Self::with_config(registry, NormalizerConfig::default())
    }

    pub fn with_config(registry: &'a StationRegistry, config: NormalizerConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize one raw table with the given region profile
    ///
    /// # Errors
    /// * `AirwatchError::MissingStationColumn` if the profile's index column is absent
    /// * `AirwatchError::RaggedTable` if columns differ in length
    /// * unit errors from conversion (a profile built through
    ///   [`RegionProfile::builder`] has already been validated)
    pub fn normalize(
        &self,
        raw: &RawTable,
        profile: &RegionProfile,
    ) -> Result<(CanonicalTable, NormalizationReport)> {
        let mut report = NormalizationReport::new(profile.name());

        let station_cells = validate_shape(raw, profile)?;
        report.rows_in = station_cells.len();

        let series = self.convert_columns(raw, profile, &mut report)?;
        let keys = self.resolve_keys(station_cells, profile, &mut report);

        let kinds: Vec<MeasurementKind> = series.keys().copied().collect();
        let mut table = CanonicalTable::new(kinds.clone());

        for (row, key) in keys.into_iter().enumerate() {
            let values: BTreeMap<MeasurementKind, Option<f64>> = series
                .iter()
                .map(|(kind, s)| (*kind, s.values[row]))
                .collect();

            let candidate = CanonicalRow { key, values };
            if !table.push_row(candidate.clone()) {
                warn!(
                    "Duplicate station '{}' in {} (row {}); keeping the first row",
                    candidate.key,
                    profile.name(),
                    row + 1
                );
                report.duplicate_keys.push(candidate.key);
            }
        }

        let station_set = self.config.station_set;
        report.filtered = table.retain(|row| station_set.accepts(&row.key));
        if report.filtered > 0 {
            debug!(
                "Dropped {} rows outside the {:?} station set",
                report.filtered, station_set
            );
        }

        report.rows_out = table.len();
        report.kinds = kinds;
        info!("{}", report.summary());

        Ok((table, report))
    }

    /// Convert every mapped column; later columns win when two map to one kind
    fn convert_columns(
        &self,
        raw: &RawTable,
        profile: &RegionProfile,
        report: &mut NormalizationReport,
    ) -> Result<BTreeMap<MeasurementKind, ConvertedSeries>> {
        let mut series: BTreeMap<MeasurementKind, ConvertedSeries> = BTreeMap::new();

        for column in raw.columns() {
            let Some(spec) = profile.column(&column.label) else {
                if column.label != profile.station_column() {
                    report.ignored_columns.push(column.label.clone());
                }
                continue;
            };

            let converted = convert(spec.kind(), &column.cells, spec.unit())?;
            debug!(
                "Converted '{}' to {} from {} ({} missing)",
                column.label,
                spec.kind(),
                spec.unit(),
                converted.missing_count()
            );

            if series.insert(spec.kind(), converted).is_some() {
                warn!(
                    "Column '{}' in {} maps to {} which an earlier column already provided; using '{}'",
                    column.label,
                    profile.name(),
                    spec.kind(),
                    column.label
                );
            }
        }

        if !report.ignored_columns.is_empty() {
            debug!(
                "Ignoring unmapped columns in {}: {:?}",
                profile.name(),
                report.ignored_columns
            );
        }
        Ok(series)
    }

    fn resolve_keys(
        &self,
        cells: &[RawCell],
        profile: &RegionProfile,
        report: &mut NormalizationReport,
    ) -> Vec<StationKey> {
        match profile.index() {
            StationIndex::Resolve { .. } => {
                let resolver = StationResolver::new(self.registry);
                cells
                    .iter()
                    .map(|cell| {
                        let resolution = resolver.resolve(&cell.as_text(), profile.aliases());
                        match resolution.unresolved {
                            Some(unresolved) => report.unresolved.push(unresolved),
                            None => report.resolved += 1,
                        }
                        resolution.key
                    })
                    .collect()
            }
            StationIndex::Passthrough { .. } => cells
                .iter()
                .map(|cell| {
                    let key = passthrough_key(cell);
                    if key.code().is_some() {
                        report.resolved += 1;
                    }
                    key
                })
                .collect(),
        }
    }
}

/// Key for an index cell that already holds a station code
fn passthrough_key(cell: &RawCell) -> StationKey {
    let text = cell.as_text();
    match text.parse::<u32>() {
        Ok(code) => StationKey::Code(code),
        Err(_) => StationKey::Label(text),
    }
}

/// Check the table shape and return the station column's cells
fn validate_shape<'t>(raw: &'t RawTable, profile: &RegionProfile) -> Result<&'t [RawCell]> {
    let station_column = profile.station_column();
    let station = raw
        .column(station_column)
        .ok_or_else(|| AirwatchError::MissingStationColumn {
            column: station_column.to_string(),
        })?;

    let expected = station.cells.len();
    if let Some(ragged) = raw.columns().iter().find(|c| c.cells.len() != expected) {
        return Err(AirwatchError::RaggedTable {
            column: ragged.label.clone(),
            expected,
            found: ragged.cells.len(),
        });
    }

    Ok(&station.cells)
}
