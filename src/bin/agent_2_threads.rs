//! Stage 2: One Thread per Agent
//! Agents run concurrently and sleep a random 100-500ms between cycles.
//!
//! Run with: cargo run --bin agent_2_threads [config.toml]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use mas_agents::{telemetry, AgentError, Greeter, GreetingEnvironment, RunConfig, Stdout};

fn main() -> Result<(), AgentError> {
    telemetry::init();
    let path = env::args_os().nth(1).map(PathBuf::from);
    let config = RunConfig::load_or(RunConfig::threaded_greeting(), path.as_deref())?;

    eprintln!("{}", "=== One Thread per Agent ===\n".bold());

    let env = Arc::new(GreetingEnvironment::new(Arc::new(Stdout)));
    let agents: Vec<Greeter> = config
        .agents
        .iter()
        .map(|agent| Greeter::new(agent.name.clone(), Arc::clone(&env)))
        .collect();

    let reports = config.runtime().spawn(agents)?.join()?;

    eprintln!("\n{}", "=== Key Points ===".bold());
    for report in &reports {
        eprintln!("{} ran {} cycles", report.name.cyan(), report.cycles);
    }
    eprintln!("1. Each agent has its own thread and its own loop");
    eprintln!("2. Random jitter makes the interleaving different on every run");
    Ok(())
}
