//! Shizuoka Prefecture hourly tables.
//!
//! Column headers spell out the substance in Japanese with the unit in
//! parentheses; some contain a stray space left by the HTML layout. Only
//! pollutant columns are mapped.

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

const ALIASES: &[(&str, &str)] = &[
    ("下田総合庁舎", "下田総合庁舎"),
    ("蒲原測定局", "蒲原"),
    ("三保第一小学校", "清水三保第一小"),
    ("庵原中学校", "清水庵原中学校"),
    ("興津北公園", "清水興津北公園"),
    ("中央", "浜松中央測定局"),
    ("東南部", "東南部測定局"),
    ("西部", "西部測定局"),
    ("東北部", "東北部測定局"),
    ("三ヶ日", "三ヶ日測定局"),
    ("天竜", "天竜測定局"),
    ("Ｒ２５７", "Ｒ－２５７"),
    ("Ｒ１５０", "Ｒ－１５０"),
    ("浜松環状線測定局", "浜松環状線"),
    ("浜北", "浜北測定局"),
    ("引佐", "引佐測定局"),
];

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("shizuoka", StationIndex::resolve("測定局名"))
        .column("二酸化硫黄SO2(ppm)", So2, "ppm")
        .column("一酸化窒素NO(ppm)", No, "ppm")
        .column("二酸化窒素NO2(ppm)", No2, "ppm")
        .column("窒素酸化物NOX(ppm)", Nox, "ppm")
        .column("光化学オキ シダントOX(ppm)", Ox, "ppm")
        .column("浮遊粒子状 物質SPM(mg/m3)", Spm, "mg/m3")
        .column("微小粒子状 物質PM2.5(μg/m3)", Pm25, "ug/m3")
        .column("非メタン 炭化水素NMHC(ppmC)", Nmhc, "ppmC")
        .column("メタンCH4(ppmC)", Ch4, "ppmC")
        .column("全炭化水素THC(ppmC)", Thc, "ppmC")
        .column("一酸化炭素CO(ppm)", Co, "ppm")
        .aliases(ALIASES.iter().copied())
        .build()
}
