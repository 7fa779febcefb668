//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wid_core::{Quota, TaskCatalog};

const DEFAULT_TEMPO_URL: &str = "https://jira.company.com";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the daily `YYYYMMDD.txt` worklogs.
    pub worklog_dir: PathBuf,

    /// Task aliases, typical-task descriptions and the void task.
    pub tasks: TaskCatalog,

    /// Expected working minutes per day.
    pub quota: Quota,

    /// Timesheet service used by `wid submit`.
    pub tempo: TempoConfig,
}

/// Jira / Tempo connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoConfig {
    /// Jira base URL.
    pub base_url: String,

    /// Jira user the worklogs are recorded for.
    pub username: Option<String>,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TEMPO_URL.to_string(),
            username: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            worklog_dir: data_dir.join("worklogs"),
            tasks: TaskCatalog::default(),
            quota: Quota::default(),
            tempo: TempoConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WID_*, nested keys split on `__`)
        figment = figment.merge(Env::prefixed("WID_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for wid.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wid"))
}

/// Returns the platform-specific data directory for wid.
///
/// On Linux: `~/.local/share/wid`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wid"))
}
