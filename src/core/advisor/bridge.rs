//! The bridge payload handed to the host application.
//!
//! ```text
//! {
//!   "archetypeAffinity": { "<archetype>": 0.73, ... },
//!   "prestigeHints": [ { "archetype", "affinity", "strength", "prestigeOptions", "explanation" } ],
//!   "meta": { "engine": "...", "version": "...", "nonForcing": true }
//! }
//! ```
//!
//! `nonForcing` is always `true`: the host must treat everything here as
//! advice and never block or auto-apply character changes because of it.

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::types::{AffinityDistribution, PrestigeHint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeMeta {
    pub engine: String,
    pub version: String,
    pub non_forcing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgePayload {
    pub archetype_affinity: AffinityDistribution,
    pub prestige_hints: Vec<PrestigeHint>,
    pub meta: BridgeMeta,
}

impl BridgePayload {
    pub fn new(
        archetype_affinity: AffinityDistribution,
        prestige_hints: Vec<PrestigeHint>,
        engine: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            archetype_affinity,
            prestige_hints,
            meta: BridgeMeta {
                engine: engine.into(),
                version: version.into(),
                non_forcing: true,
            },
        }
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
