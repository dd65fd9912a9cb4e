//! Command-line host for the archetype build advisor.
//!
//! Reads a catalog, a prestige table and a character state from disk and
//! prints the engine's JSON output on stdout. `validate` doubles as the CI
//! gate for catalog authoring: it exits non-zero on any catalog issue.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;

use archetype_advisor::config::{AppConfig, ConfigSource};
use archetype_advisor::core::advisor::{
    flatten, load_catalog, validate, AdvisorEngine, AdvisorError, AffinitySnapshot, Catalog,
    CharacterState, PrestigeTable, RawCatalog,
};
use archetype_advisor::core::logging;

/// Exit status for a failed catalog validation.
const EXIT_INVALID_CATALOG: u8 = 1;
/// Exit status for any other fatal error.
const EXIT_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Archetype catalog, overriding the configured path.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Prestige mapping table, overriding the configured path.
    #[arg(long, global = true)]
    prestige: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a catalog; exits 1 if any active archetype is malformed.
    Validate {
        /// Catalog to validate (falls back to --catalog / config).
        path: Option<PathBuf>,
    },
    /// Print the affinity distribution for a character.
    Affinity {
        /// Character state JSON.
        #[arg(long)]
        state: PathBuf,
    },
    /// Print the bridge payload for a character.
    Advise {
        /// Character state JSON.
        #[arg(long)]
        state: PathBuf,
        /// Snapshot file to check for drift and rewrite when stale.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Weight and explain a set of suggestions for a character.
    Suggest {
        /// Character state JSON.
        #[arg(long)]
        state: PathBuf,
        /// JSON object of suggestion name to base score.
        #[arg(long)]
        suggestions: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Validate { .. } => "validate",
            Command::Affinity { .. } => "affinity",
            Command::Advise { .. } => "advise",
            Command::Suggest { .. } => "suggest",
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, source) = match &args.config {
        Some(path) => match AppConfig::from_path(path) {
            Ok(config) => (config, ConfigSource::File(path.clone())),
            Err(e) => {
                eprintln!("Error: failed to load config {}: {e:#}", path.display());
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        None => AppConfig::load(),
    };

    let _log_guard = logging::init(&config.logging, &config.log_dir());
    source.log();
    let _span = tracing::info_span!("command", name = args.command.name()).entered();
    log::debug!("{} v{} starting", archetype_advisor::NAME, archetype_advisor::VERSION);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(advisor_error) = e.downcast_ref::<AdvisorError>() {
                let issues = advisor_error.catalog_issues();
                if !issues.is_empty() {
                    for issue in issues {
                        eprintln!("error: {issue}");
                    }
                    eprintln!("Catalog validation failed: {} issue(s)", issues.len());
                    return ExitCode::from(EXIT_INVALID_CATALOG);
                }
            }
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    match &args.command {
        Command::Validate { path } => {
            let path = path
                .clone()
                .or_else(|| args.catalog.clone())
                .unwrap_or_else(|| config.catalog_path());
            run_validate(&path)
        }
        Command::Affinity { state } => {
            let engine = build_engine(args, config)?;
            let state = read_state(state)?;
            let affinity = engine.affinity(&state);
            println!("{}", serde_json::to_string_pretty(&affinity)?);
            Ok(())
        }
        Command::Advise { state, snapshot } => {
            let engine = build_engine(args, config)?;
            let state = read_state(state)?;
            run_advise(&engine, &state, snapshot.as_deref())
        }
        Command::Suggest { state, suggestions } => {
            let engine = build_engine(args, config)?;
            let state = read_state(state)?;
            let contents = fs::read_to_string(suggestions)
                .with_context(|| format!("Failed to read suggestions from {}", suggestions.display()))?;
            let suggestions: IndexMap<String, f64> = serde_json::from_str(&contents)
                .with_context(|| format!("Invalid suggestions JSON in {}", suggestions.display()))?;
            let affinity = engine.affinity(&state);
            let weighted = engine.suggest(&suggestions, &affinity);
            println!("{}", serde_json::to_string_pretty(&weighted)?);
            Ok(())
        }
    }
}

/// Validate every entry, stubs included, and report the outcome.
fn run_validate(path: &Path) -> Result<()> {
    let raw = RawCatalog::from_path(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    let (_, report) = validate(&flatten(&raw, true))?;
    if report.stubs > 0 {
        eprintln!("warning: {} stub archetype(s) skipped", report.stubs);
    }
    println!(
        "{}: {} active archetype(s) valid",
        path.display(),
        report.active
    );
    Ok(())
}

fn run_advise(engine: &AdvisorEngine, state: &CharacterState, snapshot_path: Option<&Path>) -> Result<()> {
    let Some(snapshot_path) = snapshot_path else {
        println!("{}", engine.bridge_payload(state).to_json_string()?);
        return Ok(());
    };

    let stored = if snapshot_path.exists() {
        let contents = fs::read_to_string(snapshot_path)
            .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
        Some(AffinitySnapshot::from_json_str(&contents)?)
    } else {
        None
    };

    let refresh = engine.refresh_snapshot(stored.as_ref(), state)?;
    if refresh.recomputed {
        fs::write(snapshot_path, refresh.snapshot.to_json_string()?)
            .with_context(|| format!("Failed to write snapshot {}", snapshot_path.display()))?;
        log::info!("Affinity snapshot refreshed at {}", snapshot_path.display());
    } else {
        log::info!("Affinity snapshot is current");
    }

    let payload = engine.bridge_payload_for(refresh.snapshot.affinity);
    println!("{}", payload.to_json_string()?);
    Ok(())
}

fn build_engine(args: &Args, config: &AppConfig) -> Result<AdvisorEngine> {
    let catalog = read_catalog(&args.catalog.clone().unwrap_or_else(|| config.catalog_path()))?;
    let prestige_path = args
        .prestige
        .clone()
        .unwrap_or_else(|| config.prestige_table_path());
    let table = PrestigeTable::from_path(&prestige_path)
        .with_context(|| format!("Failed to load prestige table {}", prestige_path.display()))?;

    Ok(AdvisorEngine::new(Arc::new(catalog), Arc::new(table))
        .with_engine_name(&config.engine.engine_name)
        .with_max_explained_archetypes(config.engine.max_explained_archetypes))
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    let raw = RawCatalog::from_path(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    let (catalog, _) = load_catalog(&raw)?;
    Ok(catalog)
}

fn read_state(path: &Path) -> Result<CharacterState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read character state {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid character state JSON in {}", path.display()))
}
