//! Property-based tests for affinity snapshots
//!
//! Tests invariants:
//! - build_snapshot -> needs_recompute on the same state is false
//! - Identical input reproduces the identical state hash
//! - Adding a feat the character lacks always marks the snapshot stale

use proptest::prelude::*;

use super::{test_catalog, FEATS, TALENTS};
use crate::core::advisor::{build_snapshot, calculate_affinity, needs_recompute, CharacterState};

fn arb_state() -> impl Strategy<Value = CharacterState> {
    (
        prop::collection::btree_set(prop::sample::select(&FEATS[..]), 0..FEATS.len()),
        prop::collection::btree_set(prop::sample::select(&TALENTS[..]), 0..TALENTS.len()),
        prop::collection::btree_map("[A-Z]{3}", 1i64..=30, 0..4),
    )
        .prop_map(|(feats, talents, attributes)| CharacterState {
            feats: feats.into_iter().map(str::to_string).collect(),
            talents: talents.into_iter().map(str::to_string).collect(),
            attributes,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn snapshot_is_current_for_its_state(state in arb_state()) {
        let catalog = test_catalog();
        let snapshot = build_snapshot(&state, &calculate_affinity(&catalog, &state), "prop").unwrap();
        prop_assert!(!needs_recompute(Some(&snapshot), &state).unwrap());
    }

    #[test]
    fn snapshot_hash_is_reproducible(state in arb_state()) {
        let catalog = test_catalog();
        let affinity = calculate_affinity(&catalog, &state);
        let a = build_snapshot(&state, &affinity, "prop").unwrap();
        let b = build_snapshot(&state.clone(), &affinity, "prop").unwrap();
        prop_assert_eq!(a.state_hash, b.state_hash);
    }

    #[test]
    fn new_feat_marks_snapshot_stale(state in arb_state(), feat in "[a-z]{4,12}") {
        prop_assume!(!state.feats.contains(&feat));
        let catalog = test_catalog();
        let snapshot = build_snapshot(&state, &calculate_affinity(&catalog, &state), "prop").unwrap();
        let changed = state.clone().with_feat(feat);
        prop_assert!(needs_recompute(Some(&snapshot), &changed).unwrap());
    }
}
