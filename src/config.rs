use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::advisor::engine::DEFAULT_ENGINE_NAME;
use crate::core::advisor::explain::DEFAULT_MAX_ARCHETYPES;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

/// Advisor engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine name reported in the bridge payload.
    pub engine_name: String,
    /// Number of archetypes cited in a suggestion explanation.
    pub max_explained_archetypes: usize,
}

/// Input file locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Archetype catalog; defaults to `<data_dir>/archetypes.json`.
    pub catalog: Option<PathBuf>,
    /// Prestige mapping table; defaults to `<data_dir>/prestige.json`.
    pub prestige_table: Option<PathBuf>,
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Also write JSON logs to daily files in the data directory.
    pub file: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_name: DEFAULT_ENGINE_NAME.to_string(),
            max_explained_archetypes: DEFAULT_MAX_ARCHETYPES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

/// Where a loaded [`AppConfig`] came from.
///
/// Loading happens before the log subscriber exists, so the outcome is
/// returned to the caller and reported with [`ConfigSource::log`] once
/// logging is up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file at this path; defaults used.
    Default(PathBuf),
    /// The file exists but did not parse; defaults used.
    Invalid { path: PathBuf, error: String },
}

impl ConfigSource {
    /// Report the load outcome through the installed logger.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => log::info!("Loaded config from {}", path.display()),
            ConfigSource::Default(path) => {
                log::debug!("No config file at {}, using defaults", path.display())
            }
            ConfigSource::Invalid { path, error } => log::warn!(
                "Failed to parse config at {}: {error}, using defaults",
                path.display()
            ),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/archetype-advisor/config.toml`.
    /// Falls back to `Default` if the file is missing or unparseable.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to `Default` if the file
    /// is missing or unparseable.
    pub fn load_from(path: &Path) -> (Self, ConfigSource) {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return (Self::default(), ConfigSource::Default(path.to_path_buf()));
        };
        match toml::from_str(&contents) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(e) => (
                Self::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                },
            ),
        }
    }

    /// Load configuration from an explicit file. Unlike [`AppConfig::load`],
    /// a missing or malformed file is an error.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.paths.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("archetype-advisor"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Resolved catalog path.
    pub fn catalog_path(&self) -> PathBuf {
        self.paths
            .catalog
            .clone()
            .unwrap_or_else(|| self.data_dir().join("archetypes.json"))
    }

    /// Resolved prestige table path.
    pub fn prestige_table_path(&self) -> PathBuf {
        self.paths
            .prestige_table
            .clone()
            .unwrap_or_else(|| self.data_dir().join("prestige.json"))
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("archetype-advisor").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
