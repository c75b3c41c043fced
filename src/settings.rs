use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::scoring::DEFAULT_API_BASE_URL;
use crate::twin::{AgeGroup, DEFAULT_BASELINE_RISK};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    pub baseline_risk: f64,
    pub age_group: AgeGroup,
    /// Fixed seed for reproducible glucose days; entropy when absent
    pub generator_seed: Option<u64>,
    pub api_base_url: String,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            baseline_risk: DEFAULT_BASELINE_RISK,
            age_group: AgeGroup::Adult,
            generator_seed: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

/// JSON-backed settings, persisted on every update.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<SimulatorSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring malformed settings in {}: {}", path.display(), err);
                SimulatorSettings::default()
            })
        } else {
            log_info!("No settings at {}; using defaults", path.display());
            SimulatorSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> Result<SimulatorSettings> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        Ok(guard.clone())
    }

    pub fn update(&self, settings: SimulatorSettings) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("Settings lock poisoned"))?;
        *guard = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &SimulatorSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
