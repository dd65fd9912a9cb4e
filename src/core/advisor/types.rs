//! Core data models for the build advisor.
//!
//! - [`ArchetypeRaw`]: an archetype exactly as authored in the catalog
//! - [`Archetype`]: a validated, active archetype ready for scoring
//! - [`CharacterState`]: the caller's current feats, talents and attributes
//! - [`AffinityDistribution`]: normalized affinity per archetype
//! - [`PrestigeHint`]: an advisory follow-on specialization
//!
//! # Design Notes
//!
//! - Wire types use `#[serde(rename_all = "camelCase")]` to match the host
//! - Maps that feed scoring keep catalog order (`IndexMap`) so ties are stable
//! - Feats and talents are sets; the host may send them in any order

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_name;

// ============================================================================
// Archetype status
// ============================================================================

/// Lifecycle status of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchetypeStatus {
    /// Complete entry that participates in scoring.
    Active,
    /// Placeholder entry, skipped by scoring and validation.
    Stub,
}

impl ArchetypeStatus {
    /// Parse a raw status string. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "active" => Some(Self::Active),
            "stub" => Some(Self::Stub),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Stub => "stub",
        }
    }
}

impl fmt::Display for ArchetypeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Raw catalog records
// ============================================================================

/// Descriptive bias tags; catalogs author them as a string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BiasTags {
    One(String),
    Many(Vec<String>),
}

impl BiasTags {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            BiasTags::One(tag) => vec![tag],
            BiasTags::Many(tags) => tags,
        }
    }
}

/// An archetype as it appears in the catalog, before validation.
///
/// Every field is optional here; the validator decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub mechanical_bias: Option<BiasTags>,
    #[serde(default)]
    pub role_bias: Option<BiasTags>,
    #[serde(default)]
    pub attribute_bias: Option<IndexMap<String, f64>>,
    #[serde(default)]
    pub talent_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub feat_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,

    /// Class the entry was found under; filled in while flattening.
    #[serde(skip)]
    pub class_key: String,
}

impl ArchetypeRaw {
    /// Parsed status, `None` when absent or unrecognised.
    pub fn parsed_status(&self) -> Option<ArchetypeStatus> {
        self.status.as_deref().and_then(ArchetypeStatus::parse)
    }
}

// ============================================================================
// Validated archetype
// ============================================================================

/// A validated, active archetype.
///
/// Constructed only by the catalog validator, so every required field is
/// present. Keyword lists keep their authored order and duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    pub key: String,
    pub name: String,
    pub class_key: String,
    pub mechanical_bias: Vec<String>,
    pub role_bias: Vec<String>,
    pub attribute_bias: IndexMap<String, f64>,
    pub talent_keywords: Vec<String>,
    pub feat_keywords: Vec<String>,
    pub notes: String,

    #[serde(skip)]
    talent_keys: Vec<String>,
    #[serde(skip)]
    feat_keys: Vec<String>,
}

impl Archetype {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        key: String,
        name: String,
        class_key: String,
        mechanical_bias: Vec<String>,
        role_bias: Vec<String>,
        attribute_bias: IndexMap<String, f64>,
        talent_keywords: Vec<String>,
        feat_keywords: Vec<String>,
        notes: String,
    ) -> Self {
        let talent_keys = talent_keywords.iter().map(|k| normalize_name(k)).collect();
        let feat_keys = feat_keywords.iter().map(|k| normalize_name(k)).collect();
        Self {
            key,
            name,
            class_key,
            mechanical_bias,
            role_bias,
            attribute_bias,
            talent_keywords,
            feat_keywords,
            notes,
            talent_keys,
            feat_keys,
        }
    }

    /// Normalized feat keywords, in authored order.
    pub fn feat_keys(&self) -> &[String] {
        &self.feat_keys
    }

    /// Normalized talent keywords, in authored order.
    pub fn talent_keys(&self) -> &[String] {
        &self.talent_keys
    }

    /// Whether a normalized name appears among the feat or talent keywords.
    pub fn lists_keyword(&self, key: &str) -> bool {
        self.feat_keys.iter().any(|k| k == key) || self.talent_keys.iter().any(|k| k == key)
    }
}

// ============================================================================
// Character state
// ============================================================================

/// The caller's current character choices.
///
/// Only `feats`, `talents` and `attributes` feed scoring and drift
/// detection. Any other field the host sends is kept in `other` and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterState {
    #[serde(default)]
    pub feats: BTreeSet<String>,
    #[serde(default)]
    pub talents: BTreeSet<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, i64>,
    #[serde(flatten, default)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl CharacterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feat(mut self, feat: impl Into<String>) -> Self {
        self.feats.insert(feat.into());
        self
    }

    pub fn with_talent(mut self, talent: impl Into<String>) -> Self {
        self.talents.insert(talent.into());
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>, value: i64) -> Self {
        self.attributes.insert(attribute.into(), value);
        self
    }

    /// Normalized feat names.
    pub fn feat_keys(&self) -> BTreeSet<String> {
        self.feats.iter().map(|f| normalize_name(f)).collect()
    }

    /// Normalized talent names.
    pub fn talent_keys(&self) -> BTreeSet<String> {
        self.talents.iter().map(|t| normalize_name(t)).collect()
    }
}

// ============================================================================
// Affinity distribution
// ============================================================================

/// Normalized affinity per archetype key.
///
/// Only archetypes with a positive raw score appear. Entries keep catalog
/// order; use [`AffinityDistribution::ranked`] for a descending view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AffinityDistribution(IndexMap<String, f64>);

impl AffinityDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Affinity for a normalized archetype key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all affinities: 0.0 when empty, otherwise ~1.0.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Entries sorted by affinity descending; ties keep catalog order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }

    /// The `n` strongest entries.
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

// ============================================================================
// Prestige hints
// ============================================================================

/// How strongly a hint is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintStrength {
    Primary,
    Secondary,
}

/// An advisory pointer toward follow-on specializations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeHint {
    pub archetype: String,
    pub affinity: f64,
    pub strength: HintStrength,
    pub prestige_options: Vec<String>,
    pub explanation: String,
}
