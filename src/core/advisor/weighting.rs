//! Re-weighting of feature suggestions by archetype affinity.

use indexmap::IndexMap;

use super::catalog::Catalog;
use super::normalize::normalize_name;
use super::types::AffinityDistribution;

/// Multiplier added per unit of affinity of a matching archetype.
pub const AFFINITY_BOOST: f64 = 0.75;

/// Round to four decimal places.
///
/// Rounds the exact binary value, half to even, by formatting and parsing
/// back. Scaling by 10^4 first would round the multiplication error instead.
pub fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}

/// Multiplier for one suggestion: 1.0 plus a boost per archetype listing it.
///
/// Boosts add up rather than compound, so heavily overlapping archetypes
/// cannot run the score away.
pub fn suggestion_multiplier(
    suggestion: &str,
    affinity: &AffinityDistribution,
    catalog: &Catalog,
) -> f64 {
    let key = normalize_name(suggestion);
    catalog
        .iter()
        .filter(|archetype| archetype.lists_keyword(&key))
        .filter_map(|archetype| affinity.get(&archetype.key))
        .fold(1.0, |multiplier, a| multiplier + a * AFFINITY_BOOST)
}

/// Weighted score for one suggestion, rounded to four places.
pub fn weight_suggestion(
    suggestion: &str,
    base_score: f64,
    affinity: &AffinityDistribution,
    catalog: &Catalog,
) -> f64 {
    round4(base_score * suggestion_multiplier(suggestion, affinity, catalog))
}

/// Weighted scores for a batch of suggestions, in input order.
pub fn weight_suggestions(
    suggestions: &IndexMap<String, f64>,
    affinity: &AffinityDistribution,
    catalog: &Catalog,
) -> IndexMap<String, f64> {
    suggestions
        .iter()
        .map(|(name, base)| (name.clone(), weight_suggestion(name, *base, affinity, catalog)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::advisor::catalog::RawCatalog;
    use crate::core::advisor::validator::load_catalog;

    fn catalog() -> Catalog {
        let raw = RawCatalog::from_json_str(
            r#"{"classes":{"c":{"archetypes":{
                "a":{"name":"Jedi Guardian","status":"active","mechanicalBias":"","roleBias":"",
                    "attributeBias":{},"talentKeywords":["Block"],"featKeywords":["Power Attack"],"notes":""},
                "b":{"name":"Commando","status":"active","mechanicalBias":"","roleBias":"",
                    "attributeBias":{},"talentKeywords":[],"featKeywords":["Power Attack","Cleave"],"notes":""}
            }}}}"#,
        )
        .unwrap();
        load_catalog(&raw).unwrap().0
    }

    #[test]
    fn test_identity_with_empty_affinity() {
        let catalog = catalog();
        let empty = AffinityDistribution::new();
        assert_eq!(weight_suggestion("Power Attack", 2.5, &empty, &catalog), 2.5);
    }

    #[test]
    fn test_unmatched_suggestion_keeps_base() {
        let catalog = catalog();
        let dist = AffinityDistribution::from_entries(vec![("jedi guardian".to_string(), 1.0)]);
        assert_eq!(weight_suggestion("Skill Focus", 3.0, &dist, &catalog), 3.0);
    }

    #[test]
    fn test_single_match() {
        let catalog = catalog();
        let dist = AffinityDistribution::from_entries(vec![("jedi guardian".to_string(), 1.0)]);
        assert_eq!(weight_suggestion(" block", 2.0, &dist, &catalog), 3.5);
    }

    #[test]
    fn test_matches_add_not_multiply() {
        let catalog = catalog();
        let dist = AffinityDistribution::from_entries(vec![
            ("jedi guardian".to_string(), 0.6),
            ("commando".to_string(), 0.4),
        ]);
        // 1.0 + 0.6 * 0.75 + 0.4 * 0.75 = 1.75
        assert_eq!(weight_suggestion("Power Attack", 1.0, &dist, &catalog), 1.75);
    }

    #[test]
    fn test_result_is_rounded() {
        let catalog = catalog();
        let dist = AffinityDistribution::from_entries(vec![("commando".to_string(), 1.0 / 3.0)]);
        assert_eq!(weight_suggestion("Cleave", 1.0, &dist, &catalog), 1.25);
        assert_eq!(round4(1.234_56), 1.2346);
    }

    #[test]
    fn test_round4_uses_the_exact_value() {
        // 2.00005 is stored just below the halfway point; scaled by 10^4 it
        // lands exactly on 20000.5 and would round up.
        assert_eq!(round4(2.000_05), 2.0);
        assert_eq!(round4(0.123_45), 0.1235);
        assert_eq!(round4(-1.234_56), -1.2346);
        assert_eq!(round4(3.0), 3.0);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let catalog = catalog();
        let dist = AffinityDistribution::from_entries(vec![("commando".to_string(), 1.0)]);
        let mut input = IndexMap::new();
        input.insert("Cleave".to_string(), 1.0);
        input.insert("Block".to_string(), 1.0);
        let out = weight_suggestions(&input, &dist, &catalog);
        let names: Vec<&String> = out.keys().collect();
        assert_eq!(names, vec!["Cleave", "Block"]);
        assert_eq!(out["Cleave"], 1.75);
        assert_eq!(out["Block"], 1.0);
    }
}
