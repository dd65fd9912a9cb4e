//! Property-based tests for affinity scoring and suggestion weighting
//!
//! Tests invariants:
//! - Distribution is empty or sums to 1.0
//! - Every affinity lies in [0, 1]
//! - Feat/talent order does not change the result
//! - Weighting with no affinity returns the (rounded) base score
//! - Weighting never lowers a non-negative base score

use proptest::prelude::*;

use super::{test_catalog, ATTRIBUTES, FEATS, TALENTS};
use crate::core::advisor::weighting::round4;
use crate::core::advisor::{calculate_affinity, weight_suggestion, AffinityDistribution, CharacterState};

fn arb_names(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(pool), 0..pool.len())
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

fn arb_attributes() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec((prop::sample::select(&ATTRIBUTES[..]), 3i64..=20), 0..6)
        .prop_map(|attrs| attrs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn build_state(feats: &[String], talents: &[String], attributes: &[(String, i64)]) -> CharacterState {
    let mut state = CharacterState::new();
    for feat in feats {
        state = state.with_feat(feat.clone());
    }
    for talent in talents {
        state = state.with_talent(talent.clone());
    }
    for (attr, value) in attributes {
        state = state.with_attribute(attr.clone(), *value);
    }
    state
}

proptest! {
    #[test]
    fn distribution_is_empty_or_normalized(
        feats in arb_names(&FEATS),
        talents in arb_names(&TALENTS),
        attributes in arb_attributes(),
    ) {
        let catalog = test_catalog();
        let dist = calculate_affinity(&catalog, &build_state(&feats, &talents, &attributes));
        let total = dist.total();
        prop_assert!((dist.is_empty() && total == 0.0) || (total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn affinities_are_probabilities(
        feats in arb_names(&FEATS),
        talents in arb_names(&TALENTS),
        attributes in arb_attributes(),
    ) {
        let catalog = test_catalog();
        let dist = calculate_affinity(&catalog, &build_state(&feats, &talents, &attributes));
        for (_, value) in dist.iter() {
            prop_assert!(value > 0.0 && value <= 1.0);
        }
    }

    #[test]
    fn input_order_does_not_matter(
        feats in arb_names(&FEATS),
        talents in arb_names(&TALENTS),
        attributes in arb_attributes(),
    ) {
        let catalog = test_catalog();
        let forward = calculate_affinity(&catalog, &build_state(&feats, &talents, &attributes));

        let mut feats_rev = feats.clone();
        feats_rev.reverse();
        let mut talents_rev = talents.clone();
        talents_rev.reverse();
        let reversed = calculate_affinity(&catalog, &build_state(&feats_rev, &talents_rev, &attributes));

        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn weighting_without_affinity_is_identity(
        suggestion in prop::sample::select(&FEATS[..]),
        base in 0u32..100_000,
    ) {
        let catalog = test_catalog();
        let base = f64::from(base) / 1000.0;
        let weighted = weight_suggestion(suggestion, base, &AffinityDistribution::new(), &catalog);
        prop_assert_eq!(weighted, round4(base));
    }

    #[test]
    fn weighting_never_lowers_score(
        feats in arb_names(&FEATS),
        talents in arb_names(&TALENTS),
        suggestion in prop::sample::select(&FEATS[..]),
        base in 0u32..10_000,
    ) {
        let catalog = test_catalog();
        let dist = calculate_affinity(&catalog, &build_state(&feats, &talents, &[]));
        let base = f64::from(base) / 100.0;
        let weighted = weight_suggestion(suggestion, base, &dist, &catalog);
        prop_assert!(weighted >= round4(base));
    }
}
