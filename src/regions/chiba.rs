//! Chiba Prefecture hourly report tables.
//!
//! Column labels carry the unit after the kind name. Wind direction is
//! published as compass abbreviations. Many roadside stations are listed
//! without the "（車）" suffix the national table uses, and Chiba City
//! stations carry a "(千葉)" prefix.

use super::{RegionProfile, StationIndex};
use crate::error::Result;
use crate::models::MeasurementKind::*;

const ALIASES: &[(&str, &str)] = &[
    ("野田宮崎", "国設野田"),
    ("柏旭", "柏旭（車）"),
    ("柏西原", "柏西原（車）"),
    ("柏大津ケ丘", "柏大津ケ丘（車）"),
    ("松戸上本郷", "松戸上本郷（車）"),
    ("市川市市川", "市川市市川（車）"),
    ("市川行徳", "市川行徳（車）"),
    ("市川稲荷木", "市川稲荷木"),
    ("浦安美浜", "浦安美浜（車）"),
    ("船橋海神", "船橋海神（車）"),
    ("船橋日の出", "船橋日の出（車）"),
    ("八千代村上", "八千代村上（車）"),
    ("(千葉)花見川小学校", "花見川小学校"),
    ("(千葉)検見川小学校", "検見川小学校"),
    ("(千葉)山王小学校", "山王小学校"),
    ("(千葉)宮野木", "宮野木"),
    ("(千葉)大宮小学校", "大宮小学校"),
    ("(千葉)千城台わかば小学校", "千城台わかば小学校"),
    ("(千葉)泉谷小学校", "泉谷小学校"),
    ("(千葉)寒川小学校", "寒川小学校"),
    ("(千葉)福正寺", "福正寺"),
    ("(千葉)蘇我保育所", "蘇我保育所"),
    ("(千葉)都公園", "都公園"),
    ("(千葉)土気", "土気"),
    ("(千葉)真砂公園", "真砂公園"),
    ("(千葉)千草自排", "千草自排"),
    ("(千葉)葭川自排", "葭川自排"),
    ("(千葉)宮野木自排", "宮野木自排"),
    ("(千葉)真砂自排", "真砂自排"),
    ("佐倉山王", "佐倉山王（車）"),
    ("市原中川田", "市原中川田（車）"),
    ("袖ケ浦三ツ作", "袖ケ浦三ッ作"),
    ("袖ケ浦福王台", "袖ケ浦福王台"),
    ("袖ケ浦大曽根", "袖ケ浦大曽根"),
    ("木更津請西", "木更津請西（車）"),
    ("木更津牛袋", "木更津牛袋（車）"),
    ("成田花崎", "成田花崎（車）"),
];

pub fn profile() -> Result<RegionProfile> {
    RegionProfile::builder("chiba", StationIndex::resolve("測定局"))
        .column("SO2 ppm", So2, "ppm")
        .column("NO ppm", No, "ppm")
        .column("NO2 ppm", No2, "ppm")
        .column("NOX ppm", Nox, "ppm")
        .column("OX ppm", Ox, "ppm")
        .column("SPM mg/m3", Spm, "mg/m3")
        .column("PM2.5 ug/m3", Pm25, "ug/m3")
        .column("NMHC ppmC", Nmhc, "ppmC")
        .column("CH4 ppmC", Ch4, "ppmC")
        .column("THC ppmC", Thc, "ppmC")
        .column("CO ppm", Co, "ppm")
        .column("WD 方位", Wd, "EN")
        .column("WV m/s", Ws, "m/s")
        .column("TEMP ℃", Temp, "celsius")
        .column("HUM %", Hum, "%")
        .aliases(ALIASES.iter().copied())
        .build()
}
