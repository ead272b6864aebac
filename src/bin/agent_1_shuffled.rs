//! Stage 1: Shuffled Rounds
//! One runtime loop steps every agent once per round, in a random order.
//!
//! Run with: cargo run --bin agent_1_shuffled [config.toml]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use mas_agents::{
    telemetry, AgentError, Greeter, GreetingEnvironment, RunConfig, ShutdownListener, Stdout,
};

fn main() -> Result<(), AgentError> {
    telemetry::init();
    let path = env::args_os().nth(1).map(PathBuf::from);
    let config = RunConfig::load_or(RunConfig::greeting(), path.as_deref())?;

    eprintln!("{}", "=== Shuffled Rounds ===\n".bold());

    let env = Arc::new(GreetingEnvironment::new(Arc::new(Stdout)));
    let mut agents: Vec<Greeter> = config
        .agents
        .iter()
        .map(|agent| Greeter::new(agent.name.clone(), Arc::clone(&env)))
        .collect();

    let reports = config
        .runtime()
        .run_shuffled(&mut agents, &ShutdownListener::never())?;

    eprintln!("\n{}", "=== Key Points ===".bold());
    for report in &reports {
        eprintln!("{} ran {} cycles", report.name.cyan(), report.cycles);
    }
    eprintln!("1. Every agent gets exactly one step per round");
    eprintln!("2. Shuffling removes the fixed order, not the turn-taking");
    Ok(())
}
