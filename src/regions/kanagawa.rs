//! Kanagawa Prefecture monitoring tables.
//!
//! Item codes are already translated to the short kind names. Most station
//! labels carry a city or ward prefix that the national table omits.

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

const ALIASES: &[(&str, &str)] = &[
    ("逗子市逗子", "逗子市逗子"),
    ("西丹沢犬越路", "西丹沢犬越路"),
    ("移動局山北町", "移動局山北町"),
    ("国設川崎（田島）", "国設川崎"),
    ("中原区地域みまもり支援センター", "中原みまもりＣ"),
    ("高津区生活文化会館", "生活文化会館"),
    ("多摩区登戸小学校", "登戸小学校"),
    ("麻生区弘法松公園", "弘法松公園"),
    ("川崎区池上新田公園前", "池上新田公園前"),
    ("川崎区日進町", "日進町"),
    ("幸区遠藤町交差点", "遠藤町交差点"),
    ("高津区二子", "二子"),
    ("多摩区本村橋", "本村橋"),
    ("麻生区柿生", "柿生"),
    ("川崎区富士見公園", "富士見公園"),
    ("川崎市役所第３庁舎", "川崎市役所第３庁舎"),
    ("横須賀市追浜行政センター", "追浜行政Ｃ"),
    ("横須賀市久里浜行政センター", "久里浜行政Ｃ"),
    ("横須賀市西行政センター", "西行政Ｃ"),
    ("横須賀市小川町交差点", "小川町交差点"),
    ("横須賀市池上ｺﾐｭﾆﾃｨｾﾝﾀｰ", "池上コミＣ"),
    ("相模原市相模台", "相模台"),
    ("相模原市橋本", "橋本"),
    ("相模原市田名", "田名"),
    ("相模原市津久井", "津久井"),
    ("相模原市上溝", "上溝"),
    ("相模原市古淵", "古淵"),
    ("藤沢市湘南台小学校", "湘南台小学校"),
    ("藤沢市御所見小学校", "御所見小学校"),
    ("藤沢市明治市民センター", "明治市民センター"),
    ("平塚市大野公民館", "大野公民館"),
    ("平塚市神田小学校", "神田小学校"),
    ("平塚市旭小学校", "旭小学校"),
    ("平塚市花水小学校", "花水小学校"),
    ("平塚市松原歩道橋", "松原歩道橋"),
];

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("kanagawa", StationIndex::resolve("name"))
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
        .column("WV", Ws, "m/s")
        .column("TEMP", Temp, "celsius")
        .column("HUM", Hum, "%")
        .aliases(ALIASES.iter().copied())
        .build()
}
