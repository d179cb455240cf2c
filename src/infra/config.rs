// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub responder: ResponderConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Tuning for the simulated assistant backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Lower bound of the simulated network delay, inclusive.
    pub min_delay_ms: u64,
    /// Upper bound of the simulated network delay, exclusive.
    pub max_delay_ms: u64,
    /// Probability in [0, 1] that a response fails with a service error.
    pub failure_rate: f64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            failure_rate: 0.1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated latency when switching to another session.
    pub load_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { load_delay_ms: 300 }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// config.toml exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.responder.failure_rate) {
            anyhow::bail!(
                "responder.failure_rate must be in [0, 1], got {}",
                self.responder.failure_rate
            );
        }
        if self.responder.min_delay_ms > self.responder.max_delay_ms {
            anyhow::bail!(
                "responder.min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.responder.min_delay_ms,
                self.responder.max_delay_ms
            );
        }
        Ok(())
    }
}
