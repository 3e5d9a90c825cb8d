//! Assistant configuration, loadable from TOML.
//!
//! ```toml
//! [memory]
//! capacity = 1000
//! context_limit = 5
//! user_importance = 1.0
//!
//! [reasoning]
//! strategy = "tree_of_thought"
//! step_delay_ms = 100
//! ```
//!
//! Every field is optional; missing values fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::memory::{DEFAULT_CAPACITY, DEFAULT_CONTEXT_LIMIT, DEFAULT_IMPORTANCE};
use crate::reasoning::{ReasoningStrategy, DEFAULT_STEP_DELAY};

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Memory store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Maximum number of records retained.
    pub capacity: usize,
    /// Records fetched as context for each query.
    pub context_limit: usize,
    /// Importance assigned to user queries.
    pub user_importance: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            context_limit: DEFAULT_CONTEXT_LIMIT,
            user_importance: DEFAULT_IMPORTANCE,
        }
    }
}

/// Reasoning stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReasoningConfig {
    pub strategy: ReasoningStrategy,
    /// Artificial pause after each reasoning step, in milliseconds.
    pub step_delay_ms: u64,
}

impl ReasoningConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            strategy: ReasoningStrategy::default(),
            step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
        }
    }
}

/// Top-level assistant configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssistantConfig {
    pub memory: MemoryConfig,
    pub reasoning: ReasoningConfig,
}

impl AssistantConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.capacity == 0 {
            return Err(ConfigError::Invalid(
                "memory.capacity must be at least 1".to_string(),
            ));
        }
        if !self.memory.user_importance.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "memory.user_importance must be finite, got {}",
                self.memory.user_importance
            )));
        }
        Ok(())
    }
}
