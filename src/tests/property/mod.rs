//! Property-based tests for the archetype advisor
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `affinity_props`: scoring and weighting invariants
//!   - Distribution is empty or sums to 1.0
//!   - Every affinity lies in [0, 1]
//!   - Input order of feats and talents does not matter
//!   - Weighting with an empty distribution is the identity
//!
//! - `snapshot_props`: drift detection invariants
//!   - A snapshot is current for the state it was built from
//!   - Rebuilding from identical input reproduces the hash
//!   - A new feat always marks the snapshot stale
//!
//! `PROPTEST_CASES` controls the number of cases per property (default 256).

mod affinity_props;
mod snapshot_props;

use crate::core::advisor::{load_catalog, Catalog, RawCatalog};

/// Feats and talents the generated characters draw from.
pub(crate) static FEATS: [&str; 6] = [
    "Power Attack",
    "Cleave",
    "Point Blank Shot",
    "Precise Shot",
    "Skill Focus",
    "Force Training",
];
pub(crate) static TALENTS: [&str; 5] = ["Block", "Deflect", "Devastating Attack", "Evasion", "Inspire Confidence"];
pub(crate) static ATTRIBUTES: [&str; 6] = ["STR", "DEX", "CON", "INT", "WIS", "CHA"];

pub(crate) fn test_catalog() -> Catalog {
    let raw = RawCatalog::from_json_str(include_str!("../../../data/archetypes.json"))
        .expect("sample catalog parses");
    load_catalog(&raw).expect("sample catalog is valid").0
}
