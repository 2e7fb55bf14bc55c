//! JMA AMeDAS observation tables.
//!
//! Rows are keyed by the AMeDAS station number, which is not part of the
//! air-quality network; the index is taken as-is. Coordinates are expected
//! in decimal degrees.

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("amedas", StationIndex::passthrough("code"))
        .column("temp", Temp, "celsius")
        .column("humidity", Hum, "%")
        .column("lon", Lon, "degree")
        .column("lat", Lat, "degree")
        .column("code", Code, "raw")
        .build()
}
