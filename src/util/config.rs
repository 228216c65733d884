//! Configuration file support for boostpkg.
//!
//! Two configuration file locations are read:
//! - Global: `~/.boostpkg/config.toml` - User-wide defaults
//! - Project: `.boostpkg/config.toml` - Recipe-directory overrides
//!
//! Project config takes precedence over global config, and `-s`/`-o` pairs
//! on the command line take precedence over both.
//!
//! ```toml
//! [settings]
//! os = "Windows"
//! compiler = "Visual Studio"
//! "compiler.version" = "14"
//! "compiler.runtime" = "MT"
//!
//! [options]
//! shared = false
//!
//! [build]
//! jobs = 8
//!
//! [source]
//! sha256 = "..."
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// boostpkg configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings as `key = "value"`; dotted keys must be quoted
    pub settings: BTreeMap<String, String>,

    /// Recipe options
    pub options: BTreeMap<String, OptionValue>,

    /// Build settings
    pub build: BuildConfig,

    /// Source download settings
    pub source: SourceConfig,
}

/// An option value, written either as a TOML boolean or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("True"),
            OptionValue::Bool(false) => f.write_str("False"),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Default number of parallel b2 jobs (None = number of CPUs)
    pub jobs: Option<usize>,

    /// Extraction directory, relative to the recipe directory
    pub work_dir: Option<PathBuf>,

    /// Package output directory, relative to the recipe directory
    pub package_dir: Option<PathBuf>,
}

/// Source download configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL template; `{version}` and `{folder}` are substituted
    pub url: Option<String>,

    /// Expected SHA-256 of the archive
    pub sha256: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.settings.extend(other.settings);
        self.options.extend(other.options);

        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.work_dir.is_some() {
            self.build.work_dir = other.build.work_dir;
        }
        if other.build.package_dir.is_some() {
            self.build.package_dir = other.build.package_dir;
        }

        if other.source.url.is_some() {
            self.source.url = other.source.url;
        }
        if other.source.sha256.is_some() {
            self.source.sha256 = other.source.sha256;
        }
    }

    /// Configured settings as `key=value` pairs.
    pub fn setting_pairs(&self) -> impl Iterator<Item = String> + '_ {
        self.settings.iter().map(|(k, v)| format!("{}={}", k, v))
    }

    /// Configured options as `key=value` pairs.
    pub fn option_pairs(&self) -> impl Iterator<Item = String> + '_ {
        self.options.iter().map(|(k, v)| format!("{}={}", k, v))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.boostpkg/config.toml)
/// 2. Global config (~/.boostpkg/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}
