//! Run configuration, loaded from TOML.
//!
//! ```toml
//! seed = 7
//! max_cycles = 40
//!
//! [delay]
//! min_ms = 100
//! max_ms = 500
//!
//! [[agents]]
//! name = "Alice"
//! trigger = "odd"
//!
//! [[agents]]
//! name = "Bob"
//! trigger = "even"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::jitter::Jitter;
use crate::runtime::{Limits, Runtime};
use crate::trigger::Trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[default]
    Always,
    Odd,
    Even,
}

impl From<TriggerKind> for Trigger {
    fn from(kind: TriggerKind) -> Self {
        match kind {
            TriggerKind::Always => Trigger::Always,
            TriggerKind::Odd => Trigger::Odd,
            TriggerKind::Even => Trigger::Even,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    #[serde(default)]
    pub trigger: TriggerKind,
}

impl AgentConfig {
    pub fn new(name: impl Into<String>, trigger: TriggerKind) -> Self {
        Self {
            name: name.into(),
            trigger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: 100,
            max_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_cycles: Option<u64>,
    #[serde(default)]
    pub delay: DelayConfig,
    pub agents: Vec<AgentConfig>,
}

// =============================================================================
// Defaults of each stage
// =============================================================================

impl RunConfig {
    /// Alice and Bob saying hello every 100ms, forever.
    pub fn greeting() -> Self {
        Self {
            seed: None,
            max_cycles: None,
            delay: DelayConfig {
                min_ms: 100,
                max_ms: 100,
            },
            agents: vec![
                AgentConfig::new("Alice", TriggerKind::Always),
                AgentConfig::new("Bob", TriggerKind::Always),
            ],
        }
    }

    /// Alice and Bob saying hello with 100-500ms of jitter.
    pub fn threaded_greeting() -> Self {
        Self {
            delay: DelayConfig::default(),
            ..Self::greeting()
        }
    }

    /// Alice acts on odd values, Bob on even ones.
    pub fn shared_counter() -> Self {
        Self {
            seed: None,
            max_cycles: None,
            delay: DelayConfig::default(),
            agents: vec![
                AgentConfig::new("Alice", TriggerKind::Odd),
                AgentConfig::new("Bob", TriggerKind::Even),
            ],
        }
    }
}

// =============================================================================
// Loading and validation
// =============================================================================

impl RunConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise returns `default`.
    pub fn load_or(default: Self, path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(default),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: agent.name.clone(),
                });
            }
        }

        if self.delay.min_ms > self.delay.max_ms {
            return Err(ConfigError::InvalidDelay {
                min_ms: self.delay.min_ms,
                max_ms: self.delay.max_ms,
            });
        }

        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits::new(
            self.max_cycles,
            Jitter::from_millis(self.delay.min_ms, self.delay.max_ms),
        )
    }

    pub fn runtime(&self) -> Runtime {
        Runtime::new(self.limits()).with_seed(self.seed)
    }
}
