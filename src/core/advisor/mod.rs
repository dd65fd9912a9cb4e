//! Archetype Build Advisor
//!
//! Scores how closely a character's choices resemble the curated archetypes
//! of a catalog, and turns that score into advice: re-weighted suggestions,
//! rationale text, drift-aware snapshots and prestige hints.
//!
//! # Pipeline
//!
//! ```text
//!   RawCatalog --flatten--> validate --> Catalog (Arc, shared)
//!                                           |
//!                     CharacterState --> calculate_affinity
//!                                           |
//!          +-------------+-------------+----+--------------+
//!          v             v             v                   v
//!     weighting      explain       snapshot            prestige
//!          |             |             |                   |
//!          +------> WeightedSuggestion |    BridgePayload <+
//!                                      v
//!                               host key/value store
//! ```
//!
//! Every stage after catalog loading is a pure function of its inputs. The
//! engine never writes storage; snapshots are handed back to the host.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use archetype_advisor::core::advisor::*;
//!
//! let raw = RawCatalog::from_path(&catalog_path)?;
//! let (catalog, _report) = load_catalog(&raw)?;
//! let table = PrestigeTable::from_path(&prestige_path)?;
//! let engine = AdvisorEngine::new(Arc::new(catalog), Arc::new(table));
//!
//! let payload = engine.bridge_payload(&state);
//! ```

pub mod affinity;
pub mod bridge;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod explain;
pub mod normalize;
pub mod prestige;
pub mod snapshot;
pub mod types;
pub mod validator;
pub mod weighting;

pub use affinity::{calculate_affinity, raw_score, softmax};
pub use bridge::{BridgeMeta, BridgePayload};
pub use catalog::{flatten, Catalog, CatalogStats, RawCatalog, RawClass};
pub use engine::{AdvisorEngine, SnapshotRefresh, WeightedSuggestion, DEFAULT_ENGINE_NAME};
pub use error::{AdvisorError, CatalogIssue, Result};
pub use explain::{explain_suggestion, FALLBACK_EXPLANATION};
pub use normalize::normalize_name;
pub use prestige::{prestige_hints, PrestigeTable, PRIMARY_THRESHOLD, SECONDARY_THRESHOLD};
pub use snapshot::{
    build_snapshot, needs_recompute, state_hash, update_snapshot, AffinitySnapshot, SourceState,
};
pub use types::{
    AffinityDistribution, Archetype, ArchetypeRaw, ArchetypeStatus, BiasTags, CharacterState,
    HintStrength, PrestigeHint,
};
pub use validator::{load_catalog, validate, ValidationReport, REQUIRED_FIELDS};
pub use weighting::{weight_suggestion, weight_suggestions};
