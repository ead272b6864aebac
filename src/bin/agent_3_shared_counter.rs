//! Stage 3: Threads Sharing a Guarded Counter
//! Agents read a shared value without locking, decide on its parity, and
//! increase it by a random 1-4 while holding the lock.
//!
//! Run with: cargo run --bin agent_3_shared_counter [config.toml]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use mas_agents::{
    telemetry, Agent, AgentError, CounterAgent, RandomAmount, RunConfig, SharedCounterEnvironment,
    Stdout,
};
use tracing::info;

fn main() -> Result<(), AgentError> {
    telemetry::init();
    let path = env::args_os().nth(1).map(PathBuf::from);
    let config = RunConfig::load_or(RunConfig::shared_counter(), path.as_deref())?;

    eprintln!("{}", "=== Threads Sharing a Guarded Counter ===\n".bold());

    let amounts = RandomAmount::new(config.seed)?;
    let env = Arc::new(SharedCounterEnvironment::new(amounts, Arc::new(Stdout)));
    let agents: Vec<CounterAgent> = config
        .agents
        .iter()
        .map(|agent| CounterAgent::new(agent.name.clone(), agent.trigger.into(), Arc::clone(&env)))
        .collect();

    for agent in &agents {
        info!(agent = agent.name(), trigger = ?agent.trigger(), "agent ready");
    }

    let reports = config.runtime().spawn(agents)?.join()?;

    eprintln!("\n{}", "=== Key Points ===".bold());
    for report in &reports {
        eprintln!(
            "{} acted {} times in {} cycles",
            report.name.cyan(),
            report.actions,
            report.cycles
        );
    }
    eprintln!("Final value: {}", env.read().to_string().green());
    eprintln!("1. Every write happens with the lock held, so no update is lost");
    eprintln!("2. Reads skip the lock; a decision may rest on a stale value");
    Ok(())
}
