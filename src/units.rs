//! Unit conversion into canonical units.
//!
//! Every measurement kind has one canonical unit and a short list of known
//! alternates. The (kind, unit) pairs are a closed set: [`conversion_for`]
//! is an exhaustive match, and any pair outside it is a configuration error
//! raised before a single cell is touched.
//!
//! Cell-level problems never fail: anything that does not coerce to a number
//! becomes a missing value.

use crate::constants::{COMPASS_POINTS, WIND_DIRECTION_FALLBACK};
use crate::error::{AirwatchError, Result};
use crate::models::{MeasurementKind, RawCell};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Every declared-unit spelling a region profile may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    Ppb,
    Ppm,
    DeciPpm,
    DecaPpbC,
    PpbC,
    PpmC,
    MicrogramPerM3,
    MilligramPerM3,
    Compass16,
    CompassAbbrev,
    DeciMeterPerSecond,
    MeterPerSecond,
    DeciCelsius,
    Celsius,
    Percent,
    DeciPercent,
    Degree,
    Raw,
}

impl Unit {
    /// Canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ppb => "ppb",
            Self::Ppm => "ppm",
            Self::DeciPpm => "0.1ppm",
            Self::DecaPpbC => "10ppbC",
            Self::PpbC => "ppbC",
            Self::PpmC => "ppmC",
            Self::MicrogramPerM3 => "ug/m3",
            Self::MilligramPerM3 => "mg/m3",
            Self::Compass16 => "16dirc",
            Self::CompassAbbrev => "EN",
            Self::DeciMeterPerSecond => "0.1m/s",
            Self::MeterPerSecond => "m/s",
            Self::DeciCelsius => "0.1celsius",
            Self::Celsius => "celsius",
            Self::Percent => "%",
            Self::DeciPercent => "0.1%",
            Self::Degree => "degree",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = AirwatchError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s.trim() {
            "ppb" => Self::Ppb,
            "ppm" => Self::Ppm,
            "0.1ppm" => Self::DeciPpm,
            "10ppbC" => Self::DecaPpbC,
            "ppbC" => Self::PpbC,
            "ppmC" => Self::PpmC,
            "ug/m3" | "µg/m3" | "μg/m3" => Self::MicrogramPerM3,
            "mg/m3" => Self::MilligramPerM3,
            "16dirc" => Self::Compass16,
            "EN" => Self::CompassAbbrev,
            "0.1m/s" => Self::DeciMeterPerSecond,
            "m/s" => Self::MeterPerSecond,
            "0.1celsius" => Self::DeciCelsius,
            "celsius" => Self::Celsius,
            "%" => Self::Percent,
            "0.1%" => Self::DeciPercent,
            "degree" => Self::Degree,
            "raw" => Self::Raw,
            other => {
                return Err(AirwatchError::UnknownUnit {
                    unit: other.to_string(),
                });
            }
        };
        Ok(unit)
    }
}

/// How a column is turned into canonical values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// Numeric coercion followed by a multiplicative factor (1.0 = identity)
    Scale(f64),
    /// Compass abbreviation lookup for wind direction
    Compass,
}

/// Canonical unit of a kind
pub fn canonical_unit(kind: MeasurementKind) -> Unit {
    use MeasurementKind::*;
    match kind {
        So2 | No | No2 | Nox | Ox => Unit::Ppb,
        Co => Unit::DeciPpm,
        Nmhc | Ch4 | Thc => Unit::DecaPpbC,
        Spm | Pm25 => Unit::MicrogramPerM3,
        Wd => Unit::Compass16,
        Ws => Unit::DeciMeterPerSecond,
        Temp => Unit::DeciCelsius,
        Hum => Unit::Percent,
        Lon | Lat => Unit::Degree,
        Code => Unit::Raw,
    }
}

/// Resolve the conversion for a (kind, declared unit) pair.
///
/// # Errors
/// Returns `AirwatchError::UnsupportedUnit` when the kind does not accept
/// the unit. This is a region profile defect, never a data problem.
pub fn conversion_for(kind: MeasurementKind, unit: Unit) -> Result<Conversion> {
    use MeasurementKind::*;
    let conversion = match (kind, unit) {
        (So2 | No | No2 | Nox | Ox, Unit::Ppb) => Conversion::Scale(1.0),
        (So2 | No | No2 | Nox | Ox, Unit::Ppm) => Conversion::Scale(1000.0),

        (Co, Unit::DeciPpm) => Conversion::Scale(1.0),
        (Co, Unit::Ppm) => Conversion::Scale(10.0),

        (Nmhc | Ch4 | Thc, Unit::DecaPpbC) => Conversion::Scale(1.0),
        (Nmhc | Ch4 | Thc, Unit::PpbC) => Conversion::Scale(0.1),
        (Nmhc | Ch4 | Thc, Unit::PpmC) => Conversion::Scale(100.0),

        (Spm | Pm25, Unit::MicrogramPerM3) => Conversion::Scale(1.0),
        (Spm | Pm25, Unit::MilligramPerM3) => Conversion::Scale(1000.0),

        (Wd, Unit::Compass16) => Conversion::Scale(1.0),
        (Wd, Unit::CompassAbbrev) => Conversion::Compass,

        (Ws, Unit::DeciMeterPerSecond) => Conversion::Scale(1.0),
        (Ws, Unit::MeterPerSecond) => Conversion::Scale(10.0),

        (Temp, Unit::DeciCelsius) => Conversion::Scale(1.0),
        (Temp, Unit::Celsius) => Conversion::Scale(10.0),

        (Hum, Unit::Percent) => Conversion::Scale(1.0),
        (Hum, Unit::DeciPercent) => Conversion::Scale(0.1),

        (Lon | Lat, Unit::Degree) => Conversion::Scale(1.0),

        (Code, Unit::Raw) => Conversion::Scale(1.0),

        _ => {
            return Err(AirwatchError::UnsupportedUnit {
                kind: kind.name().to_string(),
                unit: unit.as_str().to_string(),
            });
        }
    };
    Ok(conversion)
}

/// A converted column, tagged with its kind rather than its raw label
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedSeries {
    pub kind: MeasurementKind,
    pub values: Vec<Option<f64>>,
}

impl ConvertedSeries {
    /// Canonical column name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Number of cells that ended up missing
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Convert one raw column of `kind` from `unit` into the canonical unit
pub fn convert(kind: MeasurementKind, cells: &[RawCell], unit: Unit) -> Result<ConvertedSeries> {
    let values = match conversion_for(kind, unit)? {
        Conversion::Scale(factor) => cells.iter().map(|c| scale(c, factor)).collect(),
        Conversion::Compass => cells.iter().map(|c| Some(compass_code(c))).collect(),
    };
    Ok(ConvertedSeries { kind, values })
}

/// Convenience form taking the unit as text, as written in a profile
pub fn convert_str(kind: MeasurementKind, cells: &[RawCell], unit: &str) -> Result<ConvertedSeries> {
    convert(kind, cells, unit.parse()?)
}

fn scale(cell: &RawCell, factor: f64) -> Option<f64> {
    let value = cell.as_number()?;
    if factor == 1.0 {
        Some(value)
    } else if factor < 1.0 {
        // 0.1 is inexact in binary; divide so 123 ppbC maps to exactly 12.3
        Some(value / (1.0 / factor).round())
    } else {
        Some(value * factor)
    }
}

/// Map a compass abbreviation to its JMA 16-point code.
///
/// Calm, blank and unrecognized strings all collapse to 0. The source data
/// does not distinguish them, so neither do we.
pub fn compass_code(cell: &RawCell) -> f64 {
    let text = cell.as_text();
    COMPASS_POINTS
        .iter()
        .position(|point| *point == text)
        .map_or(WIND_DIRECTION_FALLBACK, |code| code as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementKind::*;

    fn cells(values: &[&str]) -> Vec<RawCell> {
        values.iter().map(|v| RawCell::from(*v)).collect()
    }

    #[test]
    fn test_identity_for_every_canonical_unit() {
        let input = cells(&["12", "0", "-3.5"]);
        for kind in MeasurementKind::ALL {
            if kind == Wd {
                continue;
            }
            let series = convert(kind, &input, canonical_unit(kind)).unwrap();
            assert_eq!(series.values, vec![Some(12.0), Some(0.0), Some(-3.5)], "{kind}");
            assert_eq!(series.kind, kind);
        }

        let wd = convert(Wd, &cells(&["3", "16", "0"]), Unit::Compass16).unwrap();
        assert_eq!(wd.values, vec![Some(3.0), Some(16.0), Some(0.0)]);
    }

    #[test]
    fn test_documented_scaling_factors() {
        let cases = [
            (So2, Unit::Ppm, 1000.0),
            (No, Unit::Ppm, 1000.0),
            (No2, Unit::Ppm, 1000.0),
            (Nox, Unit::Ppm, 1000.0),
            (Ox, Unit::Ppm, 1000.0),
            (Co, Unit::Ppm, 10.0),
            (Nmhc, Unit::PpmC, 100.0),
            (Ch4, Unit::PpmC, 100.0),
            (Thc, Unit::PpmC, 100.0),
            (Spm, Unit::MilligramPerM3, 1000.0),
            (Pm25, Unit::MilligramPerM3, 1000.0),
            (Ws, Unit::MeterPerSecond, 10.0),
            (Temp, Unit::Celsius, 10.0),
        ];
        for (kind, unit, factor) in cases {
            let series = convert(kind, &cells(&["2", "0.5"]), unit).unwrap();
            assert_eq!(
                series.values,
                vec![Some(2.0 * factor), Some(0.5 * factor)],
                "{kind} from {unit}"
            );
        }
    }

    #[test]
    fn test_division_factors() {
        let thc = convert(Thc, &cells(&["123", "40"]), Unit::PpbC).unwrap();
        assert_eq!(thc.values, vec![Some(12.3), Some(4.0)]);

        let hum = convert(Hum, &cells(&["655", "1000"]), Unit::DeciPercent).unwrap();
        assert_eq!(hum.values, vec![Some(65.5), Some(100.0)]);
    }

    #[test]
    fn test_malformed_cells_become_missing() {
        let input = vec![
            RawCell::from("bad"),
            RawCell::from(""),
            RawCell::from("-"),
            RawCell::Missing,
            RawCell::Number(f64::NAN),
        ];
        for kind in MeasurementKind::ALL {
            if kind == Wd {
                continue;
            }
            let series = convert(kind, &input, canonical_unit(kind)).unwrap();
            assert_eq!(series.missing_count(), input.len(), "{kind}");
        }
        let wd = convert(Wd, &input, Unit::Compass16).unwrap();
        assert_eq!(wd.missing_count(), input.len());
    }

    #[test]
    fn test_so2_ppm_with_bad_cell() {
        let series = convert_str(So2, &cells(&["12", "bad", "8"]), "ppm").unwrap();
        assert_eq!(series.values, vec![Some(12000.0), None, Some(8000.0)]);
        assert_eq!(series.name(), "SO2");
    }

    #[test]
    fn test_compass_abbreviations() {
        let series = convert(Wd, &cells(&["NNE", "E", "S", "W", "N", "CALM"]), Unit::CompassAbbrev)
            .unwrap();
        assert_eq!(
            series.values,
            vec![
                Some(1.0),
                Some(4.0),
                Some(8.0),
                Some(12.0),
                Some(16.0),
                Some(0.0)
            ]
        );
    }

    #[test]
    fn test_unknown_compass_string_falls_back_to_zero() {
        let series = convert_str(Wd, &cells(&["XX"]), "EN").unwrap();
        assert_eq!(series.values, vec![Some(0.0)]);

        let blank = convert(Wd, &[RawCell::Missing, RawCell::from("nne")], Unit::CompassAbbrev)
            .unwrap();
        assert_eq!(blank.values, vec![Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_unknown_unit_string_is_rejected() {
        let err = convert_str(So2, &cells(&["1"]), "furlongs").unwrap_err();
        assert!(matches!(err, AirwatchError::UnknownUnit { ref unit } if unit == "furlongs"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unit_not_accepted_by_kind_is_rejected() {
        let err = convert(So2, &cells(&["1"]), Unit::MilligramPerM3).unwrap_err();
        assert!(matches!(err, AirwatchError::UnsupportedUnit { .. }));

        assert!(conversion_for(Lat, Unit::Ppm).is_err());
        assert!(conversion_for(Code, Unit::Degree).is_err());
        assert!(conversion_for(Temp, Unit::Percent).is_err());
    }

    #[test]
    fn test_micro_sign_spellings() {
        assert_eq!("µg/m3".parse::<Unit>().unwrap(), Unit::MicrogramPerM3);
        assert_eq!("μg/m3".parse::<Unit>().unwrap(), Unit::MicrogramPerM3);
    }
}
