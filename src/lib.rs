/// Archetype Advisor - build-advisory engine for tabletop character creation
///
/// Scores a character's choices against curated archetypes and turns the
/// result into weighted suggestions, explanations, drift-aware snapshots and
/// non-binding prestige hints for the host application.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
