//! Affinity snapshots and drift detection.
//!
//! A snapshot records the affinity computed for a character together with a
//! SHA-256 hash of the inputs that produced it. The host stores snapshots;
//! this module only builds and compares them.
//!
//! Only feats, talents and attributes are hashed. Changes to any other
//! character field never mark a snapshot stale.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::Result;
use super::types::{AffinityDistribution, CharacterState};

/// The scoring-relevant subset of a character.
///
/// Field order is alphabetical and every collection is ordered, so the JSON
/// encoding is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceState {
    pub attributes: BTreeMap<String, i64>,
    pub feats: BTreeSet<String>,
    pub talents: BTreeSet<String>,
}

impl SourceState {
    pub fn extract(state: &CharacterState) -> Self {
        Self {
            attributes: state.attributes.clone(),
            feats: state.feats.clone(),
            talents: state.talents.clone(),
        }
    }

    /// Hex SHA-256 of the stable JSON encoding.
    pub fn hash(&self) -> Result<String> {
        let encoded = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Persisted affinity together with the hash of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinitySnapshot {
    pub version: String,
    pub state_hash: String,
    pub affinity: AffinityDistribution,
    pub source_state: SourceState,
}

impl AffinitySnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Hash of the scoring-relevant subset of a character.
pub fn state_hash(state: &CharacterState) -> Result<String> {
    SourceState::extract(state).hash()
}

/// Build a snapshot for a freshly computed affinity.
pub fn build_snapshot(
    state: &CharacterState,
    affinity: &AffinityDistribution,
    engine_version: &str,
) -> Result<AffinitySnapshot> {
    let source_state = SourceState::extract(state);
    let state_hash = source_state.hash()?;
    Ok(AffinitySnapshot {
        version: engine_version.to_string(),
        state_hash,
        affinity: affinity.clone(),
        source_state,
    })
}

/// Whether the stored snapshot is missing or no longer matches `current`.
pub fn needs_recompute(stored: Option<&AffinitySnapshot>, current: &CharacterState) -> Result<bool> {
    let Some(snapshot) = stored else {
        log::debug!("No stored affinity snapshot; recompute required");
        return Ok(true);
    };

    let current_hash = state_hash(current)?;
    let stale = current_hash != snapshot.state_hash;
    if stale {
        log::debug!(
            "Affinity drift detected: stored {} != current {}",
            snapshot.state_hash,
            current_hash
        );
    }
    Ok(stale)
}

/// Replace a stored snapshot with a new one.
///
/// Always returns a copy of `new`. Migration between snapshot versions would
/// hook in here.
pub fn update_snapshot(old: Option<&AffinitySnapshot>, new: &AffinitySnapshot) -> AffinitySnapshot {
    if let Some(old) = old {
        if old.version != new.version {
            log::info!(
                "Replacing affinity snapshot from engine {} with engine {}",
                old.version,
                new.version
            );
        }
    }
    new.clone()
}
