//! Configuration module for the question similarity tool.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `QSIM_` and use double underscores
//! to separate nested levels:
//! - `QSIM_SCORING__THRESHOLD=0.9` sets `scoring.threshold`
//! - `QSIM_BATCH__PARALLEL_THREADS=8` sets `batch.parallel_threads`
//! - `QSIM_VOCABULARY_PATH=vocab.json` sets `vocabulary_path`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::text::{NormalizerTables, StopWords};

/// Directory holding the settings file, searched for from the current directory upwards.
pub const CONFIG_DIR: &str = ".qsim";

const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Vocabulary file (JSON token→column map, or one token per line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_path: Option<PathBuf>,

    /// Workspace root directory (where .qsim is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Duplicate scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Batch scoring settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Normalization table overrides
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScoringConfig {
    /// Cosine similarity above which a pair counts as duplicate
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BatchConfig {
    /// Number of worker threads for batch scoring
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NormalizerConfig {
    /// Words added to the stopword list
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Words removed from the stopword list
    #[serde(default)]
    pub keep_stopwords: Vec<String>,

    /// Symbol replacements merged over the defaults
    #[serde(default)]
    pub symbols: IndexMap<String, String>,

    /// Whole-word contractions merged over the defaults
    #[serde(default)]
    pub contractions: IndexMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for every target
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-target overrides, e.g. `vocabulary = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_threshold() -> f64 {
    crate::vector::thresholds::DEFAULT
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            vocabulary_path: None,
            workspace_root: None,
            debug: false,
            scoring: ScoringConfig::default(),
            batch: BatchConfig::default(),
            normalizer: NormalizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl NormalizerConfig {
    /// Default tables with the configured overrides applied.
    pub fn tables(&self) -> NormalizerTables {
        NormalizerTables::default()
            .with_symbols(self.symbols.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .with_contractions(
                self.contractions
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
    }

    /// English stopwords with the configured additions and removals.
    pub fn stopwords(&self) -> StopWords {
        StopWords::english()
            .extend(self.extra_stopwords.iter().map(String::as_str))
            .without(self.keep_stopwords.iter().map(String::as_str))
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore (__) separates nested levels,
            // single underscore stays part of the field name
            .merge(Env::prefixed("QSIM_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Find the settings file by looking for a .qsim directory
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(SETTINGS_FILE))
    }

    /// Get the workspace root directory (where .qsim is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Cannot read configuration file: {e}"))?;
        toml::from_str::<Settings>(&content).map_err(|e| {
            format!("Configuration file is corrupted: {e}\nRun 'qsim init --force' to regenerate.")
        })?;

        Ok(())
    }

    /// Vocabulary path with relative paths resolved against the workspace root.
    pub fn resolved_vocabulary_path(&self) -> Option<PathBuf> {
        let path = self.vocabulary_path.as_ref()?;
        match &self.workspace_root {
            Some(root) if path.is_relative() => Some(root.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file in the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(SETTINGS_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let mut settings = Settings::default();
        if let Ok(current_dir) = std::env::current_dir() {
            settings.workspace_root = Some(current_dir);
        }

        settings.save(&config_path)?;
        tracing::info!(target: "config", "Wrote settings to {}", config_path.display());

        Ok(config_path)
    }
}
