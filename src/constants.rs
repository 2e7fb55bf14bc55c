//! Application constants for the airwatch normalizer
//!
//! Station table layout, canonical code range, compass lookup table and
//! CLI defaults used throughout the crate.

// =============================================================================
// Canonical Station Table
// =============================================================================

/// Embedded canonical station table (national monitoring network extract)
pub const EMBEDDED_STATION_TABLE: &str = include_str!("../data/stations.csv");

/// Column headers of the national station table
pub mod station_columns {
    pub const FULL_NAME: &str = "測定局名";
    pub const SHORT_NAME: &str = "８文字名";
    pub const CODE: &str = "国環研局番";
    pub const LON_DEG: &str = "経度_度";
    pub const LON_MIN: &str = "経度_分";
    pub const LON_SEC: &str = "経度_秒";
    pub const LAT_DEG: &str = "緯度_度";
    pub const LAT_MIN: &str = "緯度_分";
    pub const LAT_SEC: &str = "緯度_秒";
    pub const ELEVATION: &str = "標高(m)";
}

/// Maximum length of a station short name, in characters
pub const SHORT_NAME_MAX_CHARS: usize = 8;

/// Smallest valid national station code (8 digits)
pub const STATION_CODE_MIN: u32 = 10_000_000;

/// Largest valid national station code (8 digits)
pub const STATION_CODE_MAX: u32 = 99_999_999;

// =============================================================================
// Wind Direction
// =============================================================================

/// Compass abbreviations indexed by JMA 16-point code.
///
/// Index 0 is calm. NNE is 1 and the table runs clockwise to N at 16.
/// Earlier converters gave CALM its own index (17) after N; here calm shares
/// code 0 with blank and unrecognized strings, so 17 is never produced.
pub const COMPASS_POINTS: [&str; 17] = [
    "CALM", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
    "NW", "NNW", "N",
];

/// Code assigned to calm, blank and unrecognized compass strings
pub const WIND_DIRECTION_FALLBACK: f64 = 0.0;

// =============================================================================
// Output
// =============================================================================

/// Output column holding the station key as text
pub const STATION_COLUMN: &str = "station";

/// Output column holding the integer station code (null when unresolved)
pub const STATION_CODE_COLUMN: &str = "station_code";

/// Output column holding the observation timestamp
pub const OBSERVED_AT_COLUMN: &str = "observed_at";

// =============================================================================
// CLI Defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default output directory for batch runs
pub const DEFAULT_OUTPUT_DIR: &str = "./normalized";
