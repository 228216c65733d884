//! Global context for boostpkg operations.
//!
//! Provides centralized access to the recipe directory and config paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config};

/// Name of the per-user and per-recipe configuration directory.
const CONFIG_DIR_NAME: &str = ".boostpkg";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory, used as the recipe directory
    cwd: PathBuf,
    /// Home directory for global data (~/.boostpkg/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = BaseDirs::new()
            .map(|b| b.home_dir().join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));
        GlobalContext { cwd, home }
    }

    /// Override the global home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the home directory (~/.boostpkg/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project-local configuration directory.
    pub fn project_dir(&self) -> PathBuf {
        self.cwd.join(CONFIG_DIR_NAME)
    }

    /// Load global and project configuration, project winning.
    pub fn load_config(&self) -> Config {
        load_config(&self.config_path(), &self.project_dir().join("config.toml"))
    }
}
