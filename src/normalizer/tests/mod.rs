//! Tests for the normalization pipeline

pub mod pipeline_tests;

use crate::models::MeasurementKind;
use crate::regions::{RegionProfile, StationIndex};

/// Minimal resolve-style profile over the registry test fixture
pub fn create_test_profile() -> RegionProfile {
    RegionProfile::builder("test", StationIndex::resolve("name"))
        .column("SO2", MeasurementKind::So2, "ppm")
        .column("WD", MeasurementKind::Wd, "EN")
        .column("TEMP", MeasurementKind::Temp, "celsius")
        .alias("野田宮崎", "国設野田")
        .alias("下田総合庁舎", "下田総合庁舎")
        .build()
        .unwrap()
}
