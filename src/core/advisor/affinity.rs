//! Archetype affinity scoring.
//!
//! Each active archetype gets a raw score from the character's feats,
//! talents and attributes. Archetypes scoring above zero are normalized with
//! a numerically stable softmax into an [`AffinityDistribution`].

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;
use super::types::{AffinityDistribution, Archetype, CharacterState};

/// Score per matched feat keyword.
pub const FEAT_WEIGHT: f64 = 1.0;
/// Score per matched talent keyword.
pub const TALENT_WEIGHT: f64 = 1.5;
/// Scale applied to `attribute * bias` so attributes only nudge the result.
pub const ATTRIBUTE_SCALE: f64 = 0.01;

/// A character's feats and talents, normalized once for a scoring pass.
struct ScoringKeys<'a> {
    feats: BTreeSet<String>,
    talents: BTreeSet<String>,
    attributes: &'a BTreeMap<String, i64>,
}

impl<'a> ScoringKeys<'a> {
    fn from_state(state: &'a CharacterState) -> Self {
        Self {
            feats: state.feat_keys(),
            talents: state.talent_keys(),
            attributes: &state.attributes,
        }
    }

    fn score(&self, archetype: &Archetype) -> f64 {
        let feat_score = archetype
            .feat_keys()
            .iter()
            .filter(|k| self.feats.contains(*k))
            .count() as f64
            * FEAT_WEIGHT;

        let talent_score = archetype
            .talent_keys()
            .iter()
            .filter(|k| self.talents.contains(*k))
            .count() as f64
            * TALENT_WEIGHT;

        let attribute_score: f64 = archetype
            .attribute_bias
            .iter()
            .filter_map(|(attr, weight)| {
                self.attributes
                    .get(attr)
                    .map(|value| *value as f64 * weight * ATTRIBUTE_SCALE)
            })
            .sum();

        feat_score + talent_score + attribute_score
    }
}

/// Raw (pre-softmax) score of one archetype for a character.
///
/// Normalizes the character's names on every call; [`raw_scores`] does that
/// once for the whole catalog.
pub fn raw_score(archetype: &Archetype, state: &CharacterState) -> f64 {
    ScoringKeys::from_state(state).score(archetype)
}

/// Raw scores for every archetype with a positive score, in catalog order.
pub fn raw_scores(catalog: &Catalog, state: &CharacterState) -> Vec<(String, f64)> {
    let keys = ScoringKeys::from_state(state);
    catalog
        .iter()
        .map(|archetype| (archetype.key.clone(), keys.score(archetype)))
        .filter(|(_, score)| *score > 0.0)
        .collect()
}

/// Affinity distribution for a character over the whole catalog.
///
/// Empty when no archetype scores above zero.
pub fn calculate_affinity(catalog: &Catalog, state: &CharacterState) -> AffinityDistribution {
    let scores = raw_scores(catalog, state);
    log::debug!(
        "Affinity: {} of {} archetype(s) scored above zero",
        scores.len(),
        catalog.len()
    );
    softmax(scores)
}

/// Stable softmax over `(key, score)` pairs, preserving their order.
pub fn softmax(scores: Vec<(String, f64)>) -> AffinityDistribution {
    if scores.is_empty() {
        return AffinityDistribution::new();
    }

    let max = scores
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<(String, f64)> = scores
        .into_iter()
        .map(|(key, score)| (key, (score - max).exp()))
        .collect();
    let denominator: f64 = exps.iter().map(|(_, e)| e).sum();

    AffinityDistribution::from_entries(exps.into_iter().map(|(key, e)| (key, e / denominator)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::advisor::catalog::RawCatalog;
    use crate::core::advisor::validator::load_catalog;

    fn catalog() -> Catalog {
        let raw = RawCatalog::from_json_str(
            r#"{"classes":{
                "jedi":{"archetypes":{
                    "guardian":{"name":"Jedi Guardian","status":"active","mechanicalBias":"melee",
                        "roleBias":"defender","attributeBias":{"STR":1.0},
                        "talentKeywords":["Block"],"featKeywords":["Power Attack"],
                        "notes":"lightsaber defense"}}},
                "soldier":{"archetypes":{
                    "commando":{"name":"Commando","status":"active","mechanicalBias":"ranged",
                        "roleBias":"striker","attributeBias":{"DEX":0.5},
                        "talentKeywords":["Devastating Attack"],"featKeywords":["Point Blank Shot","Power Attack"],
                        "notes":"heavy weapons"}}}
            }}"#,
        )
        .unwrap();
        load_catalog(&raw).unwrap().0
    }

    #[test]
    fn test_raw_score_combines_all_signals() {
        let catalog = catalog();
        let state = CharacterState::new()
            .with_feat("Power Attack")
            .with_talent("Block")
            .with_attribute("STR", 16);
        let score = raw_score(catalog.get("jedi guardian").unwrap(), &state);
        assert!((score - 2.66).abs() < 1e-9);
    }

    #[test]
    fn test_matching_is_case_and_whitespace_insensitive() {
        let catalog = catalog();
        let state = CharacterState::new().with_feat("  power ATTACK ");
        let score = raw_score(catalog.get("jedi guardian").unwrap(), &state);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_catalog_pass_matches_single_archetype_scores() {
        let catalog = catalog();
        let state = CharacterState::new()
            .with_feat(" POWER attack")
            .with_feat("Point Blank Shot")
            .with_talent("block")
            .with_attribute("DEX", 14);
        let scores = raw_scores(&catalog, &state);
        assert_eq!(scores.len(), 2);
        for (key, score) in scores {
            assert_eq!(score, raw_score(catalog.get(&key).unwrap(), &state));
        }
    }

    #[test]
    fn test_zero_scores_are_excluded() {
        let catalog = catalog();
        let state = CharacterState::new().with_feat("Point Blank Shot");
        let dist = calculate_affinity(&catalog, &state);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.get("commando"), Some(1.0));
        assert!(dist.get("jedi guardian").is_none());
    }

    #[test]
    fn test_empty_distribution_when_nothing_matches() {
        let catalog = catalog();
        let state = CharacterState::new().with_feat("Skill Focus").with_attribute("CHA", 18);
        assert!(calculate_affinity(&catalog, &state).is_empty());
    }

    #[test]
    fn test_softmax_distribution() {
        let catalog = catalog();
        let state = CharacterState::new()
            .with_feat("Power Attack")
            .with_talent("Block");
        let dist = calculate_affinity(&catalog, &state);
        // guardian 2.5, commando 1.0
        let guardian = dist.get("jedi guardian").unwrap();
        let commando = dist.get("commando").unwrap();
        let expected = 1.0 / (1.0 + (-1.5f64).exp());
        assert!((guardian - expected).abs() < 1e-12);
        assert!((guardian + commando - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_is_stable_for_large_scores() {
        let dist = softmax(vec![("a".into(), 1000.0), ("b".into(), 1000.0)]);
        assert_eq!(dist.get("a"), Some(0.5));
        assert_eq!(dist.get("b"), Some(0.5));
    }

    #[test]
    fn test_negative_attribute_bias_can_exclude() {
        let raw = RawCatalog::from_json_str(
            r#"{"classes":{"x":{"archetypes":{"a":{"name":"Brute","status":"active",
                "mechanicalBias":"","roleBias":"","attributeBias":{"INT":-1.0},
                "talentKeywords":[],"featKeywords":[],"notes":""}}}}}"#,
        )
        .unwrap();
        let (catalog, _) = load_catalog(&raw).unwrap();
        let state = CharacterState::new().with_attribute("INT", 12);
        assert!(calculate_affinity(&catalog, &state).is_empty());
    }
}
