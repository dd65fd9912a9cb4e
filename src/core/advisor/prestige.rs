//! Prestige hints: advisory pointers toward follow-on specializations.
//!
//! Archetypes with enough affinity are mapped through an operator-curated
//! table onto prestige options. Hints never force a choice.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use super::catalog::Catalog;
use super::error::{AdvisorError, Result};
use super::normalize::normalize_name;
use super::types::{AffinityDistribution, HintStrength, PrestigeHint};

/// Minimum affinity for any hint.
pub const SECONDARY_THRESHOLD: f64 = 0.18;
/// Minimum affinity for a primary hint.
pub const PRIMARY_THRESHOLD: f64 = 0.30;

/// Archetype name to prestige options, keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrestigeTable {
    entries: IndexMap<String, Vec<String>>,
}

impl PrestigeTable {
    /// Build a table from display-name keys.
    pub fn new(entries: IndexMap<String, Vec<String>>) -> Result<Self> {
        let mut normalized = IndexMap::with_capacity(entries.len());
        for (name, options) in entries {
            if options.is_empty() {
                return Err(AdvisorError::PrestigeTableInvalid {
                    reason: format!("'{name}' has no prestige options"),
                });
            }
            normalized.insert(normalize_name(&name), options);
        }
        Ok(Self { entries: normalized })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: IndexMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| AdvisorError::PrestigeTableInvalid {
                reason: e.to_string(),
            })?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        log::debug!(
            "Read prestige table with {} archetype(s) from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Options for a normalized archetype key.
    pub fn options_for(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strength for an affinity, `None` below the secondary threshold.
pub fn classify(affinity: f64) -> Option<HintStrength> {
    if affinity >= PRIMARY_THRESHOLD {
        Some(HintStrength::Primary)
    } else if affinity >= SECONDARY_THRESHOLD {
        Some(HintStrength::Secondary)
    } else {
        None
    }
}

fn hint_explanation(name: &str, notes: &str, strength: HintStrength, options: &[String]) -> String {
    let options = options.join(", ");
    match strength {
        HintStrength::Primary => format!(
            "Your choices strongly reflect the {name} archetype ({notes}). \
             Prestige paths that build on it: {options}."
        ),
        HintStrength::Secondary => format!(
            "Your choices lean toward the {name} archetype ({notes}). \
             If you keep developing it, consider: {options}."
        ),
    }
}

/// Ranked prestige hints for a distribution.
///
/// Archetypes below [`SECONDARY_THRESHOLD`] or missing from the table yield
/// no hint. The result is sorted by affinity, strongest first.
pub fn prestige_hints(
    affinity: &AffinityDistribution,
    catalog: &Catalog,
    table: &PrestigeTable,
) -> Vec<PrestigeHint> {
    let mut hints: Vec<PrestigeHint> = affinity
        .iter()
        .filter_map(|(key, value)| {
            let strength = classify(value)?;
            let options = table.options_for(key)?;
            let (name, notes) = match catalog.get(key) {
                Some(archetype) => (archetype.name.as_str(), archetype.notes.as_str()),
                None => (key, ""),
            };
            Some(PrestigeHint {
                archetype: name.to_string(),
                affinity: value,
                strength,
                prestige_options: options.to_vec(),
                explanation: hint_explanation(name, notes, strength, options),
            })
        })
        .collect();

    hints.sort_by(|a, b| b.affinity.partial_cmp(&a.affinity).unwrap_or(std::cmp::Ordering::Equal));
    log::debug!("Generated {} prestige hint(s)", hints.len());
    hints
}
