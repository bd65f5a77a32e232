use crate::error::ExplorerError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const STATS_FILE: &str = "instance_stats.json";

/// Settings read from `config.json` in the platform config directory.
/// Command-line flags take precedence over every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Where the crawl snapshot lives. Defaults to the cache directory.
    pub stats_path: Option<PathBuf>,
    /// Fetched into `stats_path` when that file is missing.
    pub stats_url: Option<String>,
    /// Replaces the built-in recommendation table.
    pub recommendations_path: Option<PathBuf>,
}

pub fn project_dirs() -> Result<ProjectDirs, ExplorerError> {
    ProjectDirs::from("org", "lemmy", "instance-explorer").ok_or(ExplorerError::NoHomeDirectory)
}

impl Configuration {
    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self, ExplorerError> {
        let dirs = project_dirs()?;
        Self::load_from(&dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ExplorerError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| {
            ExplorerError::Configuration(format!("{}: {}", path.display(), e))
        })
    }

    /// Stats path from config, else `<cache_dir>/instance_stats.json`.
    pub fn resolved_stats_path(&self) -> Result<PathBuf, ExplorerError> {
        match &self.stats_path {
            Some(p) => Ok(p.clone()),
            None => Ok(project_dirs()?.cache_dir().join(STATS_FILE)),
        }
    }
}
