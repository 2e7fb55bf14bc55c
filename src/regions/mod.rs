//! Region profiles: how to read one authority's raw table.
//!
//! A profile names the column that identifies stations, maps raw column
//! labels to (kind, declared unit) pairs, and carries the region's alias
//! table. Profiles are immutable values; every (kind, unit) pair is checked
//! when the profile is built, so a misconfigured region fails before any
//! data is read.
//!
//! Built-in profiles cover the authorities the normalizer ships with.
//! Additional regions can be described in TOML:
//!
//! ```toml
//! name = "chiba"
//! station_column = "測定局"
//! index = "resolve"
//!
//! [columns]
//! "SO2 ppm" = { kind = "SO2", unit = "ppm" }
//! "WD 方位" = { kind = "WD", unit = "EN" }
//!
//! [aliases]
//! "野田宮崎" = "国設野田"
//! ```

use crate::error::{AirwatchError, Result};
use crate::models::MeasurementKind;
use crate::resolver::AliasTable;
use crate::units::{Conversion, Unit, canonical_unit, conversion_for};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub mod amedas;
pub mod chiba;
pub mod kanagawa;
pub mod shizuoka;
pub mod tokyo;
pub mod yamanashi;

/// Names of the built-in region profiles
pub const BUILTIN_REGIONS: &[&str] = &[
    "amedas",
    "chiba",
    "kanagawa",
    "shizuoka",
    "tokyo",
    "yamanashi",
];

/// Look up a built-in profile by name
pub fn builtin(name: &str) -> Result<RegionProfile> {
    match name.trim().to_lowercase().as_str() {
        "amedas" => amedas::profile(),
        "chiba" => chiba::profile(),
        "kanagawa" => kanagawa::profile(),
        "shizuoka" => shizuoka::profile(),
        "tokyo" => tokyo::profile(),
        "yamanashi" => yamanashi::profile(),
        _ => Err(AirwatchError::UnknownRegion {
            name: name.to_string(),
        }),
    }
}

/// A validated (kind, declared unit) pair for one raw column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    kind: MeasurementKind,
    unit: Unit,
    conversion: Conversion,
}

impl ColumnSpec {
    /// # Errors
    /// `AirwatchError::UnsupportedUnit` if `kind` does not accept `unit`.
    pub fn new(kind: MeasurementKind, unit: Unit) -> Result<Self> {
        let conversion = conversion_for(kind, unit)?;
        Ok(Self {
            kind,
            unit,
            conversion,
        })
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }
}

/// How rows of a raw table are identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationIndex {
    /// Column holds station names, resolved through registry and aliases
    Resolve { column: String },
    /// Column already holds station codes (e.g. AMeDAS numbers)
    Passthrough { column: String },
}

impl StationIndex {
    pub fn resolve(column: impl Into<String>) -> Self {
        Self::Resolve {
            column: column.into(),
        }
    }

    pub fn passthrough(column: impl Into<String>) -> Self {
        Self::Passthrough {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::Resolve { column } | Self::Passthrough { column } => column,
        }
    }
}

/// Immutable description of one authority's raw table
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProfile {
    name: String,
    index: StationIndex,
    columns: Vec<(String, ColumnSpec)>,
    aliases: AliasTable,
}

impl RegionProfile {
    /// Start building a profile
    pub fn builder(name: impl Into<String>, index: StationIndex) -> RegionProfileBuilder {
        RegionProfileBuilder {
            name: name.into(),
            index,
            columns: Vec::new(),
            aliases: AliasTable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &StationIndex {
        &self.index
    }

    pub fn station_column(&self) -> &str {
        self.index.column()
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Column map in declaration order
    pub fn columns(&self) -> &[(String, ColumnSpec)] {
        &self.columns
    }

    /// Spec for a raw column label, if the region maps it
    pub fn column(&self, label: &str) -> Option<&ColumnSpec> {
        self.columns
            .iter()
            .find(|(raw, _)| raw == label)
            .map(|(_, spec)| spec)
    }

    /// Kinds this region reports, in canonical order
    pub fn kinds(&self) -> Vec<MeasurementKind> {
        let mut kinds: Vec<MeasurementKind> = self.columns.iter().map(|(_, s)| s.kind()).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Parse a profile from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ProfileFile = toml::from_str(text)?;
        file.into_profile()
    }

    /// Load a profile from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AirwatchError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        let profile = Self::from_toml_str(&text)?;
        debug!(
            "Loaded region profile '{}' from {} ({} columns, {} aliases)",
            profile.name,
            path.display(),
            profile.columns.len(),
            profile.aliases.len()
        );
        Ok(profile)
    }
}

/// Builder collecting unchecked column declarations
#[derive(Debug, Clone)]
pub struct RegionProfileBuilder {
    name: String,
    index: StationIndex,
    columns: Vec<(String, MeasurementKind, String)>,
    aliases: AliasTable,
}

impl RegionProfileBuilder {
    /// Map a raw column to a kind with a declared unit spelling
    pub fn column(
        mut self,
        label: impl Into<String>,
        kind: MeasurementKind,
        unit: impl Into<String>,
    ) -> Self {
        self.columns.push((label.into(), kind, unit.into()));
        self
    }

    /// Map a raw column already in the kind's canonical unit
    pub fn canonical_column(self, label: impl Into<String>, kind: MeasurementKind) -> Self {
        let unit = canonical_unit(kind).as_str();
        self.column(label, kind, unit)
    }

    /// Add an alias; a self-mapping records an acknowledged unresolved label
    pub fn alias(mut self, raw: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(raw, target);
        self
    }

    pub fn aliases<I, R, T>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, T)>,
        R: Into<String>,
        T: Into<String>,
    {
        for (raw, target) in pairs {
            self.aliases.insert(raw, target);
        }
        self
    }

    /// Validate every column declaration
    ///
    /// # Errors
    /// * `AirwatchError::UnknownUnit` for an unrecognized unit spelling
    /// * `AirwatchError::UnsupportedUnit` for a unit the kind does not accept
    /// * `AirwatchError::Configuration` for a repeated raw column label
    pub fn build(self) -> Result<RegionProfile> {
        let mut columns: Vec<(String, ColumnSpec)> = Vec::with_capacity(self.columns.len());
        for (label, kind, unit) in self.columns {
            if columns.iter().any(|(existing, _)| *existing == label) {
                return Err(AirwatchError::configuration(format!(
                    "region '{}' maps column '{}' twice",
                    self.name, label
                )));
            }
            let spec = ColumnSpec::new(kind, unit.parse()?)?;
            columns.push((label, spec));
        }

        Ok(RegionProfile {
            name: self.name,
            index: self.index,
            columns,
            aliases: self.aliases,
        })
    }
}

// =============================================================================
// TOML representation
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum IndexMode {
    #[default]
    Resolve,
    Passthrough,
}

#[derive(Debug, Deserialize)]
struct ColumnEntry {
    kind: MeasurementKind,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    name: String,
    station_column: String,
    #[serde(default)]
    index: IndexMode,
    #[serde(default)]
    columns: BTreeMap<String, ColumnEntry>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

impl ProfileFile {
    fn into_profile(self) -> Result<RegionProfile> {
        let index = match self.index {
            IndexMode::Resolve => StationIndex::resolve(self.station_column),
            IndexMode::Passthrough => StationIndex::passthrough(self.station_column),
        };

        let mut builder = RegionProfile::builder(self.name, index).aliases(self.aliases);
        for (label, entry) in self.columns {
            builder = match entry.unit {
                Some(unit) => builder.column(label, entry.kind, unit),
                None => builder.canonical_column(label, entry.kind),
            };
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::AliasEntry;
    use std::io::Write;

    #[test]
    fn test_every_builtin_profile_is_valid() {
        for name in BUILTIN_REGIONS {
            let profile = builtin(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(profile.name(), *name);
            assert!(!profile.columns().is_empty());
        }
    }

    #[test]
    fn test_unknown_region() {
        assert!(matches!(
            builtin("hokkaido"),
            Err(AirwatchError::UnknownRegion { .. })
        ));
        assert!(builtin(" Chiba ").is_ok());
    }

    #[test]
    fn test_builder_rejects_unknown_unit() {
        let err = RegionProfile::builder("broken", StationIndex::resolve("name"))
            .column("SO2", MeasurementKind::So2, "ppt")
            .build()
            .unwrap_err();
        assert!(matches!(err, AirwatchError::UnknownUnit { .. }));
    }

    #[test]
    fn test_builder_rejects_unit_wrong_for_kind() {
        let err = RegionProfile::builder("broken", StationIndex::resolve("name"))
            .column("SPM", MeasurementKind::Spm, "ppm")
            .build()
            .unwrap_err();
        assert!(matches!(err, AirwatchError::UnsupportedUnit { .. }));
    }

    #[test]
    fn test_builder_rejects_repeated_column() {
        let err = RegionProfile::builder("broken", StationIndex::resolve("name"))
            .column("SO2", MeasurementKind::So2, "ppm")
            .column("SO2", MeasurementKind::So2, "ppb")
            .build()
            .unwrap_err();
        assert!(matches!(err, AirwatchError::Configuration { .. }));
    }

    #[test]
    fn test_profile_from_toml() {
        let text = r#"
name = "test-region"
station_column = "測定局"

[columns]
"SO2 ppm" = { kind = "SO2", unit = "ppm" }
"WD 方位" = { kind = "WD", unit = "EN" }
"PM2.5" = { kind = "PM25" }

[aliases]
"野田宮崎" = "国設野田"
"市川稲荷木" = "市川稲荷木"
"#;
        let profile = RegionProfile::from_toml_str(text).unwrap();

        assert_eq!(profile.name(), "test-region");
        assert_eq!(profile.index(), &StationIndex::resolve("測定局"));
        assert_eq!(profile.column("SO2 ppm").unwrap().unit(), Unit::Ppm);
        assert_eq!(
            profile.column("WD 方位").unwrap().conversion(),
            Conversion::Compass
        );
        assert_eq!(
            profile.column("PM2.5").unwrap().unit(),
            Unit::MicrogramPerM3
        );
        assert_eq!(
            profile.aliases().get("野田宮崎"),
            Some(&AliasEntry::Rename("国設野田".to_string()))
        );
        assert!(profile.aliases().is_acknowledged("市川稲荷木"));
        assert_eq!(
            profile.kinds(),
            vec![
                MeasurementKind::So2,
                MeasurementKind::Pm25,
                MeasurementKind::Wd
            ]
        );
    }

    #[test]
    fn test_toml_accepts_published_pm25_spelling() {
        let text = r#"
name = "pm"
station_column = "name"

[columns]
"微小粒子状物質" = { kind = "PM2.5", unit = "mg/m3" }
"PM25" = { kind = "PM25" }
"#;
        let profile = RegionProfile::from_toml_str(text).unwrap();
        let published = profile.column("微小粒子状物質").unwrap();
        assert_eq!(published.kind(), MeasurementKind::Pm25);
        assert_eq!(published.conversion(), Conversion::Scale(1000.0));
        assert_eq!(
            profile.column("PM25").unwrap().kind(),
            "PM2.5".parse::<MeasurementKind>().unwrap()
        );
    }

    #[test]
    fn test_toml_passthrough_index() {
        let text = r#"
name = "jma"
station_column = "code"
index = "passthrough"

[columns]
"temp" = { kind = "TEMP", unit = "celsius" }
"#;
        let profile = RegionProfile::from_toml_str(text).unwrap();
        assert_eq!(profile.index(), &StationIndex::passthrough("code"));
    }

    #[test]
    fn test_toml_unknown_unit_is_fatal() {
        let text = r#"
name = "broken"
station_column = "name"

[columns]
"SO2" = { kind = "SO2", unit = "parts" }
"#;
        let err = RegionProfile::from_toml_str(text).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_toml_unknown_kind_is_parse_error() {
        let text = r#"
name = "broken"
station_column = "name"

[columns]
"O3" = { kind = "O3", unit = "ppb" }
"#;
        assert!(matches!(
            RegionProfile::from_toml_str(text),
            Err(AirwatchError::Toml(_))
        ));
    }

    #[test]
    fn test_profile_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"file-region\"").unwrap();
        writeln!(file, "station_column = \"name\"").unwrap();
        writeln!(file, "[columns]").unwrap();
        writeln!(file, "\"NO2\" = {{ kind = \"NO2\", unit = \"ppb\" }}").unwrap();

        let profile = RegionProfile::from_toml_file(file.path()).unwrap();
        assert_eq!(profile.name(), "file-region");
        assert_eq!(profile.kinds(), vec![MeasurementKind::No2]);
    }
}
