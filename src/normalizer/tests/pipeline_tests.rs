//! Tests for MeasurementNormalizer

use super::*;
use crate::config::{NormalizerConfig, StationSet};
use crate::error::AirwatchError;
use crate::models::{RawCell, RawTable, StationKey};
use crate::normalizer::MeasurementNormalizer;
use crate::regions;
use crate::resolver::UnresolvedReason;
use crate::station_registry::StationRegistry;
use crate::station_registry::tests::create_test_registry;

#[test]
fn test_noda_miyazaki_resolves_through_alias() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["野田宮崎"])
        .with_column("SO2", ["0.003"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    let key = StationKey::Code(14010010);
    assert_eq!(table.len(), 1);
    assert_eq!(table.value(&key, MeasurementKind::So2), Some(3.0));
    assert_eq!(report.resolved, 1);
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_bad_cells_become_missing() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "国設新宿", "浜松中央"])
        .with_column("SO2", ["12", "bad", "8"]);

    let (table, _) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    assert_eq!(
        table.column(MeasurementKind::So2).unwrap(),
        vec![Some(12000.0), None, Some(8000.0)]
    );
}

#[test]
fn test_unmatched_label_is_kept_with_observation() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "架空の局"])
        .with_column("TEMP", ["25.3", "24.0"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    let label = StationKey::Label("架空の局".to_string());
    assert_eq!(table.value(&label, MeasurementKind::Temp), Some(240.0));
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].raw_label, "架空の局");
    assert_eq!(report.unresolved[0].reason, UnresolvedReason::NotFound);
    assert!(!report.is_clean());
}

#[test]
fn test_acknowledged_label_does_not_count_as_unexpected() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["下田総合庁舎"])
        .with_column("SO2", ["0.001"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    assert!(table.get(&StationKey::Label("下田総合庁舎".into())).is_some());
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unexpected_unresolved().count(), 0);
    assert!(report.is_clean());
}

#[test]
fn test_unmapped_columns_are_dropped() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("地域", ["千葉"])
        .with_column("name", ["国設野田"])
        .with_column("SO2", ["0.002"])
        .with_column("種別", ["一般局"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    assert_eq!(table.kinds(), &[MeasurementKind::So2]);
    assert_eq!(report.ignored_columns, vec!["地域", "種別"]);
    assert!(table.column(MeasurementKind::Temp).is_none());
}

#[test]
fn test_output_is_tagged_by_kind_not_label() {
    let registry = create_test_registry();
    let profile = RegionProfile::builder("labels", StationIndex::resolve("局"))
        .column("二酸化硫黄SO2(ppm)", MeasurementKind::So2, "ppm")
        .build()
        .unwrap();
    let raw = RawTable::new()
        .with_column("局", ["国設野田"])
        .with_column("二酸化硫黄SO2(ppm)", ["0.001"]);

    let (table, _) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &profile)
        .unwrap();
    assert_eq!(
        table.value(&StationKey::Code(14010010), MeasurementKind::So2),
        Some(1.0)
    );
}

#[test]
fn test_wind_direction_compass_column() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "国設新宿", "浜松中央"])
        .with_column("WD", ["NNE", "CALM", "XX"]);

    let (table, _) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();
    assert_eq!(
        table.column(MeasurementKind::Wd).unwrap(),
        vec![Some(1.0), Some(0.0), Some(0.0)]
    );
}

#[test]
fn test_duplicate_keys_keep_first_row() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "野田宮崎"])
        .with_column("SO2", ["0.001", "0.009"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.value(&StationKey::Code(14010010), MeasurementKind::So2),
        Some(1.0)
    );
    assert_eq!(report.duplicate_keys, vec![StationKey::Code(14010010)]);
    assert_eq!(report.rows_in, 2);
    assert_eq!(report.rows_out, 1);
}

#[test]
fn test_later_column_wins_for_repeated_kind() {
    let registry = create_test_registry();
    let profile = RegionProfile::builder("twice", StationIndex::resolve("name"))
        .column("SO2 ppm", MeasurementKind::So2, "ppm")
        .column("SO2 ppb", MeasurementKind::So2, "ppb")
        .build()
        .unwrap();
    let raw = RawTable::new()
        .with_column("name", ["国設野田"])
        .with_column("SO2 ppm", ["0.001"])
        .with_column("SO2 ppb", ["7"]);

    let (table, _) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &profile)
        .unwrap();
    assert_eq!(
        table.value(&StationKey::Code(14010010), MeasurementKind::So2),
        Some(7.0)
    );
}

#[test]
fn test_network_filter_drops_labels() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "架空の局", "中央"])
        .with_column("SO2", ["0.001", "0.002", "0.003"]);

    let config = NormalizerConfig::default().network_only();
    let (table, report) = MeasurementNormalizer::with_config(&registry, config)
        .normalize(&raw, &create_test_profile())
        .unwrap();

    assert_eq!(table.keys().collect::<Vec<_>>(), vec![&StationKey::Code(14010010)]);
    assert_eq!(report.filtered, 2);
    assert_eq!(report.rows_out, 1);
}

#[test]
fn test_default_station_set_keeps_everything() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "架空の局"])
        .with_column("SO2", ["0.001", "0.002"]);

    let normalizer = MeasurementNormalizer::new(&registry);
    assert_eq!(normalizer.config().station_set, StationSet::All);

    let (table, report) = normalizer.normalize(&raw, &create_test_profile()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(report.filtered, 0);
}

#[test]
fn test_passthrough_index() {
    let registry = create_test_registry();
    let profile = regions::builtin("amedas").unwrap();
    let raw = RawTable::new()
        .with_column("code", vec![RawCell::Number(44132.0), RawCell::from("11001"), RawCell::from("n/a")])
        .with_column("temp", ["25.1", "18.0", ""])
        .with_column("lat", ["35.6917", "45.5", "0"])
        .with_column("lon", ["139.75", "141.9", "0"])
        .with_column("humidity", ["60", "70", "80"]);

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &profile)
        .unwrap();

    let tokyo = StationKey::Code(44132);
    assert_eq!(table.value(&tokyo, MeasurementKind::Temp), Some(251.0));
    assert_eq!(table.value(&tokyo, MeasurementKind::Code), Some(44132.0));
    assert_eq!(table.value(&tokyo, MeasurementKind::Lat), Some(35.6917));
    assert!(table.get(&StationKey::Label("n/a".into())).is_some());
    assert_eq!(report.resolved, 2);
    // Passthrough never consults the registry
    assert!(report.unresolved.is_empty());

    let config = NormalizerConfig::default().network_only();
    let (filtered, _) = MeasurementNormalizer::with_config(&registry, config)
        .normalize(&raw, &profile)
        .unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn test_missing_station_column_is_fatal() {
    let registry = create_test_registry();
    let raw = RawTable::new().with_column("SO2", ["0.001"]);

    let err = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap_err();
    assert!(matches!(err, AirwatchError::MissingStationColumn { ref column } if column == "name"));
}

#[test]
fn test_ragged_table_is_fatal() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", ["国設野田", "国設新宿"])
        .with_column("SO2", ["0.001"]);

    let err = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap_err();
    assert!(matches!(
        err,
        AirwatchError::RaggedTable { expected: 2, found: 1, .. }
    ));
}

#[test]
fn test_empty_table() {
    let registry = create_test_registry();
    let raw = RawTable::new()
        .with_column("name", Vec::<&str>::new())
        .with_column("SO2", Vec::<&str>::new());

    let (table, report) = MeasurementNormalizer::new(&registry)
        .normalize(&raw, &create_test_profile())
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.kinds(), &[MeasurementKind::So2]);
    assert_eq!(report.rows_in, 0);
}

#[test]
fn test_builtin_chiba_with_embedded_registry() {
    let registry = StationRegistry::shared().unwrap();
    let profile = regions::builtin("chiba").unwrap();
    let raw = RawTable::new()
        .with_column("地域", ["野田市", "市川市", "千葉市"])
        .with_column("測定局", ["野田宮崎", "市川稲荷木", "(千葉)宮野木"])
        .with_column("SO2 ppm", ["0.001", "0.002", "-"])
        .with_column("WD 方位", ["NNE", "CALM", "S"])
        .with_column("TEMP ℃", ["28.4", "29", "30.1"]);

    let (table, report) = MeasurementNormalizer::new(registry)
        .normalize(&raw, &profile)
        .unwrap();

    let noda = StationKey::Code(14010010);
    assert_eq!(table.value(&noda, MeasurementKind::So2), Some(1.0));
    assert_eq!(table.value(&noda, MeasurementKind::Wd), Some(1.0));
    assert_eq!(table.value(&noda, MeasurementKind::Temp), Some(284.0));
    assert_eq!(report.rows_out, 3);
    assert_eq!(report.ignored_columns, vec!["地域"]);
    assert_eq!(report.unexpected_unresolved().count(), 0);
}
