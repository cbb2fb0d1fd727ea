use crate::domain::WeekStart;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const START_OF_WEEK_VAR: &str = "REPORTRANGE_START_OF_WEEK";
pub const CONFIG_PATH_VAR: &str = "REPORTRANGE_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub week_start: WeekStart,
}

impl ResolverConfig {
    /// Build the config from the environment.
    ///
    /// `REPORTRANGE_START_OF_WEEK` wins over the JSON file named by
    /// `REPORTRANGE_CONFIG` (or the per-user default path). Bad values are
    /// logged and skipped.
    pub fn from_env() -> Self {
        let start_of_week = std::env::var(START_OF_WEEK_VAR).ok();
        let config_path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .ok()
            .or_else(Self::default_path);

        Self::from_sources(start_of_week.as_deref(), config_path.as_deref())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reportrange").join("config.json"))
    }

    fn from_sources(start_of_week: Option<&str>, config_path: Option<&Path>) -> Self {
        let mut config = match config_path {
            Some(path) if path.exists() => Self::from_json_file(path).unwrap_or_else(|e| {
                warn!("Ignoring config file: {:#}", e);
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Some(raw) = start_of_week {
            match raw.trim().parse::<i64>().map(WeekStart::new) {
                Ok(Ok(week_start)) => config.week_start = week_start,
                Ok(Err(e)) => warn!("Ignoring {}: {}", START_OF_WEEK_VAR, e),
                Err(e) => warn!("Ignoring {}={:?}: {}", START_OF_WEEK_VAR, raw, e),
            }
        }

        config
    }
}
