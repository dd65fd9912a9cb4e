//! Name normalization shared by every advisor stage.
//!
//! Archetype names, feat and talent keywords, suggestion names and prestige
//! table keys are all compared through [`normalize_name`].

/// Lowercase and trim a display name into its lookup key.
#[inline]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Compare two names under normalization.
#[inline]
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jedi Guardian "), "jedi guardian");
        assert_eq!(normalize_name("POWER ATTACK"), "power attack");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Block", " block"));
        assert!(!names_match("Block", "Deflect"));
    }
}
