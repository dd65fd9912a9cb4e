//! [`AdvisorEngine`]: the advisory pipeline behind one handle.
//!
//! The engine holds shared, immutable references to the catalog and the
//! prestige table. Every method is a pure function of its arguments, so one
//! engine can serve many characters concurrently.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::affinity::calculate_affinity;
use super::bridge::BridgePayload;
use super::catalog::Catalog;
use super::error::Result;
use super::explain::{explain_suggestion, DEFAULT_MAX_ARCHETYPES};
use super::prestige::{prestige_hints, PrestigeTable};
use super::snapshot::{build_snapshot, needs_recompute, update_snapshot, AffinitySnapshot};
use super::types::{AffinityDistribution, CharacterState, PrestigeHint};
use super::weighting::weight_suggestion;

/// Engine name reported in bridge payloads by default.
pub const DEFAULT_ENGINE_NAME: &str = "archetype-advisor";

/// A suggestion after affinity weighting, with its rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedSuggestion {
    pub name: String,
    pub base_score: f64,
    pub score: f64,
    pub explanation: String,
}

/// Result of [`AdvisorEngine::refresh_snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRefresh {
    pub snapshot: AffinitySnapshot,
    /// `false` when the stored snapshot was still current and is returned as is.
    pub recomputed: bool,
}

#[derive(Debug, Clone)]
pub struct AdvisorEngine {
    catalog: Arc<Catalog>,
    prestige: Arc<PrestigeTable>,
    engine_name: String,
    version: String,
    max_explained_archetypes: usize,
}

impl AdvisorEngine {
    pub fn new(catalog: Arc<Catalog>, prestige: Arc<PrestigeTable>) -> Self {
        Self {
            catalog,
            prestige,
            engine_name: DEFAULT_ENGINE_NAME.to_string(),
            version: crate::VERSION.to_string(),
            max_explained_archetypes: DEFAULT_MAX_ARCHETYPES,
        }
    }

    pub fn with_engine_name(mut self, name: impl Into<String>) -> Self {
        self.engine_name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_max_explained_archetypes(mut self, max: usize) -> Self {
        self.max_explained_archetypes = max;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn affinity(&self, state: &CharacterState) -> AffinityDistribution {
        calculate_affinity(&self.catalog, state)
    }

    pub fn explain(&self, suggestion: &str, affinity: &AffinityDistribution) -> String {
        explain_suggestion(suggestion, affinity, &self.catalog, self.max_explained_archetypes)
    }

    /// Weight and explain suggestions, highest score first.
    ///
    /// Equal scores keep input order.
    pub fn suggest(
        &self,
        suggestions: &IndexMap<String, f64>,
        affinity: &AffinityDistribution,
    ) -> Vec<WeightedSuggestion> {
        let mut weighted: Vec<WeightedSuggestion> = suggestions
            .iter()
            .map(|(name, base)| WeightedSuggestion {
                name: name.clone(),
                base_score: *base,
                score: weight_suggestion(name, *base, affinity, &self.catalog),
                explanation: self.explain(name, affinity),
            })
            .collect();
        weighted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        weighted
    }

    pub fn prestige_hints(&self, affinity: &AffinityDistribution) -> Vec<PrestigeHint> {
        prestige_hints(affinity, &self.catalog, &self.prestige)
    }

    /// Assemble the bridge payload for an already computed distribution.
    pub fn bridge_payload_for(&self, affinity: AffinityDistribution) -> BridgePayload {
        let hints = self.prestige_hints(&affinity);
        BridgePayload::new(affinity, hints, &self.engine_name, &self.version)
    }

    /// Score a character and assemble the bridge payload.
    pub fn bridge_payload(&self, state: &CharacterState) -> BridgePayload {
        self.bridge_payload_for(self.affinity(state))
    }

    /// Compute affinity and wrap it in a fresh snapshot.
    pub fn snapshot(&self, state: &CharacterState) -> Result<AffinitySnapshot> {
        build_snapshot(state, &self.affinity(state), &self.version)
    }

    /// Reuse `stored` when it still matches `state`, otherwise recompute.
    pub fn refresh_snapshot(
        &self,
        stored: Option<&AffinitySnapshot>,
        state: &CharacterState,
    ) -> Result<SnapshotRefresh> {
        if let Some(current) = stored {
            if !needs_recompute(Some(current), state)? {
                return Ok(SnapshotRefresh {
                    snapshot: current.clone(),
                    recomputed: false,
                });
            }
        }

        let fresh = self.snapshot(state)?;
        Ok(SnapshotRefresh {
            snapshot: update_snapshot(stored, &fresh),
            recomputed: true,
        })
    }
}
