//! Tokyo Metropolitan Government tables, already in mostly canonical units.

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

const ALIASES: &[(&str, &str)] = &[
    ("国設東京新宿", "国設東京（新宿）"),
    ("小金井市東町", "小金井市東町"),
    ("町田市能ｹ谷", "町田市能ケ谷"),
    ("八王子市片倉町", "片倉町"),
    ("八王子市館町", "館町"),
    ("八王子市大楽寺町", "大楽寺町"),
    ("玉川通り上馬", "玉川通り上馬"),
    ("第一京浜高輪", "第一京浜高輪"),
    ("甲州街道八木町", "八木町"),
];

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("tokyo", StationIndex::resolve("name"))
        .column("SO2", So2, "ppb")
        .column("NO", No, "ppb")
        .column("NO2", No2, "ppb")
        .column("NOX", Nox, "ppb")
        .column("OX", Ox, "ppb")
        .column("SPM", Spm, "ug/m3")
        .column("PM2.5", Pm25, "ug/m3")
        .column("NMHC", Nmhc, "10ppbC")
        .column("CH4", Ch4, "10ppbC")
        .column("THC", Thc, "ppmC")
        .column("CO", Co, "0.1ppm")
        .column("風向", Wd, "16dirc")
        .column("風速", Ws, "0.1m/s")
        .column("気温", Temp, "0.1celsius")
        .column("湿度", Hum, "0.1%")
        .aliases(ALIASES.iter().copied())
        .build()
}
