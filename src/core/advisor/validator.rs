//! Catalog validation gate.
//!
//! Converts the flattened, untyped catalog into a [`Catalog`] of typed
//! [`Archetype`] records. Any structural problem fails the whole catalog;
//! every problem found is reported, not just the first.

use indexmap::IndexMap;

use super::catalog::{flatten, Catalog, RawCatalog};
use super::error::{AdvisorError, CatalogIssue, Result};
use super::types::{Archetype, ArchetypeRaw, ArchetypeStatus};

/// Fields every active archetype must carry, in contract order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "name",
    "status",
    "mechanicalBias",
    "roleBias",
    "attributeBias",
    "talentKeywords",
    "featKeywords",
    "notes",
];

/// Outcome of a successful validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub active: usize,
    pub stubs: usize,
}

/// Validate a flattened catalog and build the scoring [`Catalog`].
///
/// Stubs are skipped and counted. Invalid statuses and missing fields are
/// collected across all entries and returned together as
/// [`AdvisorError::CatalogInvalid`].
pub fn validate(flat: &IndexMap<String, ArchetypeRaw>) -> Result<(Catalog, ValidationReport)> {
    let mut errors = Vec::new();
    let mut archetypes = IndexMap::new();
    let mut report = ValidationReport::default();

    for (key, raw) in flat {
        match raw.parsed_status() {
            Some(ArchetypeStatus::Stub) => {
                report.stubs += 1;
            }
            None => errors.push(CatalogIssue::InvalidStatus {
                key: key.clone(),
                status: raw.status.clone(),
            }),
            Some(ArchetypeStatus::Active) => match build_archetype(key, raw) {
                Ok(archetype) => {
                    report.active += 1;
                    archetypes.insert(key.clone(), archetype);
                }
                Err(issue) => errors.push(issue),
            },
        }
    }

    if report.stubs > 0 {
        log::warn!("{} stub archetype(s) skipped", report.stubs);
    }

    if !errors.is_empty() {
        for issue in &errors {
            log::error!("Catalog issue: {issue}");
        }
        return Err(AdvisorError::CatalogInvalid { errors });
    }

    log::info!("Catalog validated: {} active archetype(s)", report.active);
    Ok((Catalog::from_archetypes(archetypes), report))
}

/// Gate a raw catalog and build the scoring catalog from its active entries.
///
/// Every entry, stubs included, goes through [`validate`] first, so invalid
/// statuses still fail the load. The scoring catalog is then flattened
/// without stubs, so a stub cannot shadow an active archetype of the same
/// name.
pub fn load_catalog(raw: &RawCatalog) -> Result<(Catalog, ValidationReport)> {
    let stats = raw.stats();
    log::debug!(
        "Loading catalog: {} class(es), {} entr(ies), {} active, {} stub(s)",
        stats.classes,
        stats.entries,
        stats.active,
        stats.stubs
    );
    let (_, gate) = validate(&flatten(raw, true))?;
    let (catalog, built) = validate(&flatten(raw, false))?;
    Ok((
        catalog,
        ValidationReport {
            active: built.active,
            stubs: gate.stubs,
        },
    ))
}

fn build_archetype(key: &str, raw: &ArchetypeRaw) -> std::result::Result<Archetype, CatalogIssue> {
    let raw = raw.clone();
    match (
        raw.name,
        raw.status,
        raw.mechanical_bias,
        raw.role_bias,
        raw.attribute_bias,
        raw.talent_keywords,
        raw.feat_keywords,
        raw.notes,
    ) {
        (
            Some(name),
            Some(_),
            Some(mechanical_bias),
            Some(role_bias),
            Some(attribute_bias),
            Some(talent_keywords),
            Some(feat_keywords),
            Some(notes),
        ) => Ok(Archetype::new(
            key.to_string(),
            name,
            raw.class_key,
            mechanical_bias.into_vec(),
            role_bias.into_vec(),
            attribute_bias,
            talent_keywords,
            feat_keywords,
            notes,
        )),
        (name, status, mechanical_bias, role_bias, attribute_bias, talent_keywords, feat_keywords, notes) => {
            let present = [
                name.is_some(),
                status.is_some(),
                mechanical_bias.is_some(),
                role_bias.is_some(),
                attribute_bias.is_some(),
                talent_keywords.is_some(),
                feat_keywords.is_some(),
                notes.is_some(),
            ];
            Err(CatalogIssue::MissingFields {
                key: key.to_string(),
                fields: REQUIRED_FIELDS
                    .iter()
                    .zip(present)
                    .filter(|(_, present)| !present)
                    .map(|(field, _)| *field)
                    .collect(),
            })
        }
    }
}
