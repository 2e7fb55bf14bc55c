//! Shared test utilities and fixtures for station registry tests

use crate::models::StationRecord;
use crate::station_registry::StationRegistry;

pub mod query_tests;

/// Station table header in the national layout
pub const TABLE_HEADER: &str =
    "測定局名,８文字名,国環研局番,経度_度,経度_分,経度_秒,緯度_度,緯度_分,緯度_秒,標高(m)";

/// Create a test station with standard parameters
pub fn create_test_station(
    code: u32,
    full_name: &str,
    short_name: &str,
    lat: f64,
    lon: f64,
) -> StationRecord {
    StationRecord {
        code,
        full_name: full_name.to_string(),
        short_name: short_name.to_string(),
        longitude: lon,
        latitude: lat,
        elevation: Some(10.0),
    }
}

/// Small registry with one ambiguous short name ("中央")
pub fn create_test_registry() -> StationRegistry {
    StationRegistry::from_records(vec![
        create_test_station(14010010, "国設野田", "国設野田", 35.9444, 139.8694),
        create_test_station(13104010, "国設東京（新宿）", "国設新宿", 35.6917, 139.7),
        create_test_station(13102010, "中央区晴海", "中央", 35.6528, 139.7806),
        create_test_station(12101050, "千葉市中央", "中央", 35.6083, 140.1222),
        create_test_station(22131010, "浜松中央測定局", "浜松中央", 34.7056, 137.7278),
    ])
    .unwrap()
}

/// Build CSV text for a station table from data lines
pub fn station_table_csv(lines: &[&str]) -> String {
    let mut csv = String::from(TABLE_HEADER);
    csv.push('\n');
    for line in lines {
        csv.push_str(line);
        csv.push('\n');
    }
    csv
}
