//! Engine settings persisted next to the data store.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::domain::Currency;
use crate::errors::BudgetError;
use crate::storage::json_backend::write_atomic;
use crate::utils::{ensure_dir, PathResolver};

const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub currency: Currency,
    /// Period of the status reminder check.
    #[serde(default = "EngineConfig::default_reminder_interval")]
    pub reminder_interval_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl EngineConfig {
    fn default_reminder_interval() -> u64 {
        DEFAULT_REMINDER_INTERVAL_SECS
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs.max(1))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            reminder_interval_secs: DEFAULT_REMINDER_INTERVAL_SECS,
            data_dir: None,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BudgetError> {
        Self::with_base_dir(PathResolver::resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Missing file yields the defaults.
    pub fn load(&self) -> Result<EngineConfig, BudgetError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(EngineConfig::default())
        }
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), BudgetError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "engine config saved");
        Ok(())
    }

    /// Where the data store lives: the configured directory, else the base directory.
    pub fn data_dir(&self, config: &EngineConfig) -> PathBuf {
        config.data_dir.clone().unwrap_or_else(|| self.base.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
