use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end an agent or a whole run. None of them are retried.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("the counter lock was poisoned by a panicking agent")]
    LockPoisoned,

    #[error("increment amount {amount} is outside 1..=4")]
    InvalidAmount { amount: u32 },

    #[error("random number generator failed: {0}")]
    Rng(#[from] rand::Error),

    #[error("failed to start agent '{name}'")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("agent '{name}' panicked")]
    AgentPanicked { name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config must declare at least one agent")]
    NoAgents,

    #[error("agent names must not be empty")]
    EmptyName,

    #[error("agent name '{name}' is declared twice")]
    DuplicateName { name: String },

    #[error("delay bounds are reversed (min: {min_ms}ms, max: {max_ms}ms)")]
    InvalidDelay { min_ms: u64, max_ms: u64 },
}
