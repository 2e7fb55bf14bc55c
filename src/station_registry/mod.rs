//! Canonical station registry with name indices
//!
//! The registry holds the national station table, keyed by station code,
//! plus two secondary indices (full name and 8-character short name) used by
//! the resolver. It is built once and never mutated afterwards, so a single
//! instance can be shared by any number of concurrent normalizations.

use crate::error::Result;
use crate::models::StationRecord;
use std::collections::HashMap;
use std::sync::OnceLock;

pub mod loader;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use loader::LoadStats;

static SHARED_REGISTRY: OnceLock<StationRegistry> = OnceLock::new();

/// Immutable station registry providing O(1) lookups by code and by name
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    /// Station records indexed by national station code
    pub(crate) stations: HashMap<u32, StationRecord>,

    /// Codes indexed by full station name
    pub(crate) by_full_name: HashMap<String, Vec<u32>>,

    /// Codes indexed by short station name
    pub(crate) by_short_name: HashMap<String, Vec<u32>>,
}

impl StationRegistry {
    /// Process-wide registry built from the embedded station table.
    ///
    /// The first caller pays for the load; a load failure is returned to
    /// that caller and retried by the next one.
    pub fn shared() -> Result<&'static StationRegistry> {
        if let Some(registry) = SHARED_REGISTRY.get() {
            return Ok(registry);
        }
        let registry = Self::load()?;
        Ok(SHARED_REGISTRY.get_or_init(|| registry))
    }

    /// Stations whose full name equals `name` exactly
    pub fn lookup_by_full_name(&self, name: &str) -> Vec<&StationRecord> {
        self.records_for(self.by_full_name.get(name))
    }

    /// Stations whose short name equals `name` exactly
    pub fn lookup_by_short_name(&self, name: &str) -> Vec<&StationRecord> {
        self.records_for(self.by_short_name.get(name))
    }

    /// Distinct stations matching `name` in either index, ordered by code.
    ///
    /// A station whose full and short names are identical appears once.
    pub fn lookup_by_name(&self, name: &str) -> Vec<&StationRecord> {
        let mut codes: Vec<u32> = self
            .by_full_name
            .get(name)
            .into_iter()
            .chain(self.by_short_name.get(name))
            .flatten()
            .copied()
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes.iter().filter_map(|code| self.stations.get(code)).collect()
    }

    fn records_for(&self, codes: Option<&Vec<u32>>) -> Vec<&StationRecord> {
        codes
            .map(|codes| codes.iter().filter_map(|c| self.stations.get(c)).collect())
            .unwrap_or_default()
    }
}
