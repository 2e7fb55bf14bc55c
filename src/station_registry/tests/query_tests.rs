//! Tests for station lookup and search functionality

use super::*;

#[test]
fn test_lookup_by_full_name() {
    let registry = create_test_registry();

    let found = registry.lookup_by_full_name("国設野田");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, 14010010);

    assert!(registry.lookup_by_full_name("国設新宿").is_empty());
    assert!(registry.lookup_by_full_name("存在しない局").is_empty());
}

#[test]
fn test_lookup_by_short_name() {
    let registry = create_test_registry();

    let found = registry.lookup_by_short_name("国設新宿");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, 13104010);

    let ambiguous = registry.lookup_by_short_name("中央");
    assert_eq!(ambiguous.len(), 2);
}

#[test]
fn test_lookup_by_name_counts_each_station_once() {
    let registry = create_test_registry();

    // Full and short name are identical for 国設野田
    let found = registry.lookup_by_name("国設野田");
    assert_eq!(found.len(), 1);

    let ambiguous = registry.lookup_by_name("中央");
    let codes: Vec<u32> = ambiguous.iter().map(|s| s.code).collect();
    assert_eq!(codes, vec![12101050, 13102010]);
}

#[test]
fn test_get_and_contains() {
    let registry = create_test_registry();

    assert!(registry.contains(22131010));
    assert_eq!(registry.get(22131010).unwrap().short_name, "浜松中央");
    assert!(!registry.contains(99999999));
    assert!(registry.get(99999999).is_none());
    assert_eq!(registry.station_count(), 5);
}

#[test]
fn test_stations_are_ordered_by_code() {
    let registry = create_test_registry();
    let codes: Vec<u32> = registry.stations().iter().map(|s| s.code).collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
}

#[test]
fn test_find_stations_by_name() {
    let registry = create_test_registry();

    let found = registry.find_stations_by_name("中央");
    let codes: Vec<u32> = found.iter().map(|s| s.code).collect();
    assert_eq!(codes, vec![12101050, 13102010, 22131010]);

    assert!(registry.find_stations_by_name("札幌").is_empty());
}

#[test]
fn test_find_stations_in_region() {
    let registry = create_test_registry();

    // Greater Tokyo only
    let kanto = registry.find_stations_in_region(35.5, 36.0, 139.5, 140.5);
    assert_eq!(kanto.len(), 4);

    let shizuoka = registry.find_stations_in_region(34.5, 35.0, 137.0, 138.0);
    assert_eq!(shizuoka.len(), 1);
    assert_eq!(shizuoka[0].code, 22131010);
}

#[test]
fn test_ambiguous_names() {
    let registry = create_test_registry();
    assert_eq!(registry.ambiguous_names(), vec![("中央", 2)]);
}
