//! Station identity resolution.
//!
//! Regional authorities name stations their own way. A raw label is first
//! passed through the region's alias table (one substitution, never
//! chained), then looked up in the registry's full-name and short-name
//! indices. Exactly one matching station yields its code; anything else
//! keeps the label and produces an [`UnresolvedStation`] observation. This
//! path never fails.

use crate::models::StationKey;
use crate::station_registry::StationRegistry;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// What an alias table says about a raw label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasEntry {
    /// Look the station up under this name instead
    Rename(String),
    /// Label is known to have no registry counterpart; look it up as-is
    Acknowledged,
}

/// Per-region mapping from raw station labels to registry names.
///
/// An entry mapping a label to itself is stored as
/// [`AliasEntry::Acknowledged`]: the label is known and has no canonical
/// counterpart (or an ambiguous one), as opposed to simply being absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias; `raw == target` records an acknowledged unresolved label
    pub fn insert(&mut self, raw: impl Into<String>, target: impl Into<String>) {
        let raw = raw.into();
        let target = target.into();
        let entry = if raw == target {
            AliasEntry::Acknowledged
        } else {
            AliasEntry::Rename(target)
        };
        self.entries.insert(raw, entry);
    }

    /// Mark a label as known-unresolvable
    pub fn acknowledge(&mut self, raw: impl Into<String>) {
        self.entries.insert(raw.into(), AliasEntry::Acknowledged);
    }

    pub fn get(&self, raw: &str) -> Option<&AliasEntry> {
        self.entries.get(raw)
    }

    /// Label to use for registry lookup after a single substitution
    pub fn substitute<'a>(&'a self, raw: &'a str) -> &'a str {
        match self.entries.get(raw) {
            Some(AliasEntry::Rename(target)) => target.as_str(),
            _ => raw,
        }
    }

    pub fn is_acknowledged(&self, raw: &str) -> bool {
        matches!(self.entries.get(raw), Some(AliasEntry::Acknowledged))
    }

    /// Entries ordered by raw label
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasEntry)> {
        let mut entries: Vec<(&str, &AliasEntry)> =
            self.entries.iter().map(|(raw, entry)| (raw.as_str(), entry)).collect();
        entries.sort_by_key(|(raw, _)| *raw);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Into<String>, T: Into<String>> FromIterator<(R, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (R, T)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (raw, target) in iter {
            table.insert(raw, target);
        }
        table
    }
}

/// Why a label did not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UnresolvedReason {
    /// No station carries this name
    NotFound,
    /// Several stations carry this name
    Ambiguous { candidates: Vec<u32> },
}

/// Observation emitted for each label that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedStation {
    /// Label as it appeared in the raw table
    pub raw_label: String,
    /// Label actually looked up (after alias substitution)
    pub lookup_label: String,
    pub reason: UnresolvedReason,
    /// True when the alias table lists the label as known-unresolvable
    pub acknowledged: bool,
}

/// Outcome of resolving one raw label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub key: StationKey,
    pub unresolved: Option<UnresolvedStation>,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.unresolved.is_none()
    }
}

/// Resolves raw station labels against a shared registry
#[derive(Debug, Clone, Copy)]
pub struct StationResolver<'a> {
    registry: &'a StationRegistry,
}

impl<'a> StationResolver<'a> {
    pub fn new(registry: &'a StationRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a raw label to a station code, or keep the (substituted) label
    pub fn resolve(&self, raw_label: &str, aliases: &AliasTable) -> Resolution {
        let raw = raw_label.trim();
        let lookup = aliases.substitute(raw);
        let matches = if lookup.is_empty() {
            Vec::new()
        } else {
            self.registry.lookup_by_name(lookup)
        };

        if let [station] = matches.as_slice() {
            return Resolution {
                key: StationKey::Code(station.code),
                unresolved: None,
            };
        }

        let reason = if matches.is_empty() {
            UnresolvedReason::NotFound
        } else {
            UnresolvedReason::Ambiguous {
                candidates: matches.iter().map(|s| s.code).collect(),
            }
        };
        let acknowledged = aliases.is_acknowledged(raw);

        if acknowledged {
            debug!("Station '{}' is a known unresolved label ({:?})", raw, reason);
        } else {
            warn!(
                "Could not resolve station '{}' (looked up as '{}'): {:?}",
                raw, lookup, reason
            );
        }

        Resolution {
            key: StationKey::Label(lookup.to_string()),
            unresolved: Some(UnresolvedStation {
                raw_label: raw.to_string(),
                lookup_label: lookup.to_string(),
                reason,
                acknowledged,
            }),
        }
    }

    /// Resolve a label and return only the key
    pub fn resolve_key(&self, raw_label: &str, aliases: &AliasTable) -> StationKey {
        self.resolve(raw_label, aliases).key
    }
}
