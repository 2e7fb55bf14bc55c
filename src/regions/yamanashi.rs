//! Yamanashi Prefecture tables (no temperature or humidity).

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("yamanashi", StationIndex::resolve("name"))
        .column("SO2", So2, "ppm")
        .column("NO", No, "ppm")
        .column("NO2", No2, "ppm")
        .column("NOX", Nox, "ppm")
        .column("OX", Ox, "ppm")
        .column("SPM", Spm, "mg/m3")
        .column("PM2.5", Pm25, "ug/m3")
        .column("NMHC", Nmhc, "ppmC")
        .column("CH4", Ch4, "ppmC")
        .column("THC", Thc, "ppmC")
        .column("CO", Co, "ppm")
        .column("WD", Wd, "16dirc")
        .column("WS", Ws, "m/s")
        // 吉田 also exists in Nagano
        .alias("吉田", "吉田")
        .alias("甲府穴切", "甲府穴切")
        .alias("移動局_身延", "移動局_身延")
        .build()
}
