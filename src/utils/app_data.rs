use crate::search::SearchOptions;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "fsearch";
const CONFIG_FILE: &str = "config.json";

/// Overrides `worker_threads`
pub const ENV_THREADS: &str = "FSEARCH_THREADS";
/// Overrides the default result cap
pub const ENV_LIMIT: &str = "FSEARCH_LIMIT";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Size of the search worker pool
    /// If 0, uses the number of CPU cores
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Options applied to every search unless the caller overrides them
    #[serde(default)]
    pub search: SearchOptions,
}

fn default_worker_threads() -> usize {
    0 // 0 means use CPU count
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            search: SearchOptions::default(),
        }
    }
}

impl SearchConfig {
    /// Load config from the app data directory, or return default if not found.
    /// Environment overrides are applied on top.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Apply `FSEARCH_*` overrides read through `lookup`; unparsable values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(threads) = parse_override(&lookup, ENV_THREADS) {
            self.worker_threads = threads;
        }
        if let Some(limit) = parse_override(&lookup, ENV_LIMIT) {
            self.search.limit = limit;
        }
    }

    /// Get the effective worker count (resolves 0 to CPU count)
    pub fn effective_worker_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus()
        } else {
            self.worker_threads
        }
    }
}

fn parse_override(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid override {}={:?}", key, raw);
            None
        }
    }
}

/// Get the number of CPUs available
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}
