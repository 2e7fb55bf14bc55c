//! Station lookup and search functionality

use super::StationRegistry;
use crate::models::StationRecord;

impl StationRegistry {
    /// Get a station by national code (O(1) lookup)
    pub fn get(&self, code: u32) -> Option<&StationRecord> {
        self.stations.get(&code)
    }

    /// Check if a station exists in the registry
    pub fn contains(&self, code: u32) -> bool {
        self.stations.contains_key(&code)
    }

    /// Get the total number of stations in the registry
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// All stations, ordered by code
    pub fn stations(&self) -> Vec<&StationRecord> {
        let mut stations: Vec<&StationRecord> = self.stations.values().collect();
        stations.sort_by_key(|s| s.code);
        stations
    }

    /// Find stations whose full or short name contains `pattern`
    ///
    /// Matching is a plain substring test; station names are Japanese so no
    /// case folding is applied. Results are ordered by code.
    pub fn find_stations_by_name(&self, pattern: &str) -> Vec<&StationRecord> {
        let mut found: Vec<&StationRecord> = self
            .stations
            .values()
            .filter(|s| s.full_name.contains(pattern) || s.short_name.contains(pattern))
            .collect();
        found.sort_by_key(|s| s.code);
        found
    }

    /// Find stations within a geographic bounding box
    pub fn find_stations_in_region(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Vec<&StationRecord> {
        let mut found: Vec<&StationRecord> = self
            .stations
            .values()
            .filter(|s| {
                s.latitude >= min_lat
                    && s.latitude <= max_lat
                    && s.longitude >= min_lon
                    && s.longitude <= max_lon
            })
            .collect();
        found.sort_by_key(|s| s.code);
        found
    }

    /// Names that map to more than one station, with their station count
    ///
    /// Useful when writing alias tables: any raw label equal to one of these
    /// names cannot resolve without an alias.
    pub fn ambiguous_names(&self) -> Vec<(&str, usize)> {
        let mut names: Vec<(&str, usize)> = self
            .by_full_name
            .keys()
            .chain(self.by_short_name.keys())
            .map(|name| (name.as_str(), self.lookup_by_name(name).len()))
            .filter(|(_, count)| *count > 1)
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
