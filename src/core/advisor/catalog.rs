//! Archetype catalog loading.
//!
//! The authored catalog is nested by character class:
//!
//! ```text
//! { "classes": { "<classKey>": { "archetypes": { "<archetypeKey>": { ... } } } } }
//! ```
//!
//! [`flatten`] walks it into a single map keyed by normalized archetype name.
//! The validator then turns that map into an immutable [`Catalog`].

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::{AdvisorError, Result};
use super::normalize::normalize_name;
use super::types::{Archetype, ArchetypeRaw, ArchetypeStatus};

// ============================================================================
// Raw catalog document
// ============================================================================

/// The catalog document as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCatalog {
    pub classes: IndexMap<String, RawClass>,
}

/// One character class and its archetypes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClass {
    #[serde(default)]
    pub archetypes: IndexMap<String, ArchetypeRaw>,
}

impl RawCatalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AdvisorError::CatalogParse(e.to_string()))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        log::debug!("Read catalog from {}", path.display());
        Ok(catalog)
    }

    /// Entry counts across every class.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            classes: self.classes.len(),
            ..Default::default()
        };
        for class in self.classes.values() {
            for raw in class.archetypes.values() {
                stats.entries += 1;
                match raw.parsed_status() {
                    Some(ArchetypeStatus::Active) => stats.active += 1,
                    Some(ArchetypeStatus::Stub) => stats.stubs += 1,
                    None => {}
                }
            }
        }
        stats
    }
}

/// Entry counts for a raw catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub classes: usize,
    pub entries: usize,
    pub active: usize,
    pub stubs: usize,
}

// ============================================================================
// Flattening
// ============================================================================

/// Flatten the nested catalog into a map keyed by normalized name.
///
/// Entries are kept when `include_stubs` is set or their status is `active`.
/// Two entries that normalize to the same key: the later one wins. Entries
/// without a `name` are keyed by their catalog key.
pub fn flatten(catalog: &RawCatalog, include_stubs: bool) -> IndexMap<String, ArchetypeRaw> {
    let mut flat: IndexMap<String, ArchetypeRaw> = IndexMap::new();

    for (class_key, class) in &catalog.classes {
        for (archetype_key, raw) in &class.archetypes {
            if !include_stubs && raw.parsed_status() != Some(ArchetypeStatus::Active) {
                continue;
            }

            let key = normalize_name(raw.name.as_deref().unwrap_or(archetype_key));
            let mut entry = raw.clone();
            entry.class_key = class_key.clone();

            if let Some(previous) = flat.insert(key.clone(), entry) {
                log::warn!(
                    "Archetype '{}' in class '{}' overwrites the entry from class '{}'",
                    key,
                    class_key,
                    previous.class_key
                );
            }
        }
    }

    flat
}

// ============================================================================
// Validated catalog
// ============================================================================

/// Immutable, validated set of active archetypes in catalog order.
///
/// Built once at startup and shared by reference (usually behind an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    archetypes: IndexMap<String, Archetype>,
}

impl Catalog {
    pub(crate) fn from_archetypes(archetypes: IndexMap<String, Archetype>) -> Self {
        Self { archetypes }
    }

    /// Archetype by normalized key.
    pub fn get(&self, key: &str) -> Option<&Archetype> {
        self.archetypes.get(key)
    }

    /// Archetype by display name, normalizing first.
    pub fn find(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(&normalize_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.values()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}
