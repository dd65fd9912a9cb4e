//! Human-readable rationale for suggestions.
//!
//! Pure formatting over an already computed distribution. Identical inputs
//! always produce identical text.

use super::catalog::Catalog;
use super::types::AffinityDistribution;

/// Number of archetypes named in an explanation by default.
pub const DEFAULT_MAX_ARCHETYPES: usize = 2;

/// Text used when no archetype can be cited.
pub const FALLBACK_EXPLANATION: &str = "This is a solid general choice.";

/// Phrase describing a single archetype.
pub fn archetype_phrase(name: &str, notes: &str) -> String {
    format!("{name}\u{2013}style build ({notes})")
}

/// Explain a suggestion using the strongest archetypes of the distribution.
///
/// Archetypes missing from the catalog are skipped. At most two phrases are
/// ever cited, even when `max_archetypes` allows more. With nothing to cite
/// the result is [`FALLBACK_EXPLANATION`].
pub fn explain_suggestion(
    suggestion: &str,
    affinity: &AffinityDistribution,
    catalog: &Catalog,
    max_archetypes: usize,
) -> String {
    let phrases: Vec<String> = affinity
        .top(max_archetypes)
        .into_iter()
        .filter_map(|(key, _)| catalog.get(key))
        .map(|archetype| archetype_phrase(&archetype.name, &archetype.notes))
        .collect();

    log::trace!("Explaining '{}' with {} archetype(s)", suggestion, phrases.len());

    match phrases.as_slice() {
        [] => FALLBACK_EXPLANATION.to_string(),
        [only] => format!("This fits well with your {only}."),
        [first, second, ..] => format!("This fits well with your {first} and {second}."),
    }
}
