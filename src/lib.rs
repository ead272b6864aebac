//! # Agents and Environments
//!
//! Runnable exercises showing how agents interact with a shared environment,
//! from a single cooperative loop up to threads coordinating through a
//! lock-guarded counter.
//!
//! ## Stages Covered
//!
//! 0. **Sequential Loops** - each agent runs its own loop, one after another
//! 1. **Shuffled Rounds** - one loop steps every agent in a random order
//! 2. **Thread per Agent** - agents run concurrently with random jitter
//! 3. **Shared Counter** - agents read a counter and increment it under a lock
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run --bin agent_0_sequential
//! cargo run --bin agent_1_shuffled
//! cargo run --bin agent_2_threads
//! cargo run --bin agent_3_shared_counter
//!
//! # Any stage accepts a TOML run configuration
//! cargo run --bin agent_3_shared_counter -- run.toml
//! ```
//!
//! ## Key Dependencies
//!
//! - `rand` - increment amounts, jitter and shuffling
//! - `crossbeam` - cancellation channel that also serves as an interruptible sleep
//! - `thiserror` - derive macro for the error types
//! - `serde` + `toml` - run configuration
//! - `tracing` - diagnostics on stderr

pub mod agent;
pub mod config;
pub mod console;
pub mod environment;
pub mod error;
pub mod jitter;
pub mod random;
pub mod runtime;
pub mod shutdown;
pub mod telemetry;
pub mod trigger;

pub use agent::{Agent, CounterAgent, Greeter, Step};
pub use config::{AgentConfig, DelayConfig, RunConfig, TriggerKind};
pub use console::{Console, Stdout, Transcript};
pub use environment::{GreetingEnvironment, Increment, SharedCounterEnvironment};
pub use error::{AgentError, ConfigError};
pub use jitter::Jitter;
pub use random::{AmountSource, FixedAmount, RandomAmount, AMOUNTS};
pub use runtime::{AgentReport, Limits, Runtime, RuntimeHandle};
pub use shutdown::{SharedTrigger, ShutdownListener, ShutdownTrigger};
pub use trigger::Trigger;
