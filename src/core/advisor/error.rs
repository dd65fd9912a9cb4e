//! Error types for the build advisor.
//!
//! Catalog authoring problems are collected as [`CatalogIssue`]s and reported
//! together; everything else maps onto a single [`AdvisorError`] variant.

use std::fmt;

use thiserror::Error;

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Errors raised while loading catalogs, validating them, or encoding output.
#[derive(Error, Debug)]
pub enum AdvisorError {
    // =========================================================================
    // Catalog Errors
    // =========================================================================

    /// One or more active archetypes failed validation.
    ///
    /// Every issue found is carried, not just the first one.
    #[error("Catalog validation failed with {} issue(s)", .errors.len())]
    CatalogInvalid {
        /// All issues found during the validation pass
        errors: Vec<CatalogIssue>,
    },

    /// The catalog document does not have the expected nesting.
    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    /// The prestige mapping table is malformed.
    #[error("Prestige table invalid: {reason}")]
    PrestigeTableInvalid {
        /// Description of what made the table invalid
        reason: String,
    },

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdvisorError {
    /// Issues carried by a failed validation, empty for any other error.
    pub fn catalog_issues(&self) -> &[CatalogIssue] {
        match self {
            AdvisorError::CatalogInvalid { errors } => errors,
            _ => &[],
        }
    }
}

/// A single structural problem with one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// `status` is neither `active` nor `stub`.
    InvalidStatus {
        /// Normalized catalog key of the archetype
        key: String,
        /// The status value found (`None` when absent)
        status: Option<String>,
    },
    /// An active archetype lacks required fields.
    MissingFields {
        /// Normalized catalog key of the archetype
        key: String,
        /// Required fields that were absent, in contract order
        fields: Vec<&'static str>,
    },
}

impl CatalogIssue {
    /// Catalog key the issue refers to.
    pub fn key(&self) -> &str {
        match self {
            CatalogIssue::InvalidStatus { key, .. } | CatalogIssue::MissingFields { key, .. } => {
                key
            }
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::InvalidStatus { key, status } => match status {
                Some(status) => write!(f, "[{key}] invalid status '{status}'"),
                None => write!(f, "[{key}] invalid status (missing)"),
            },
            CatalogIssue::MissingFields { key, fields } => {
                write!(f, "[{key}] missing fields: {}", fields.join(", "))
            }
        }
    }
}
