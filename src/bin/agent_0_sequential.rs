//! Stage 0: Sequential Agent Loops
//! Each agent owns its loop and runs it to the end before the next starts.
//!
//! Run with: cargo run --bin agent_0_sequential [config.toml]
//!
//! With the default (unbounded) configuration Bob never gets a turn.

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

    eprintln!("{}", "=== Sequential Agent Loops ===\n".bold());

    let env = Arc::new(GreetingEnvironment::new(Arc::new(Stdout)));
    let mut agents: Vec<Greeter> = config
        .agents
        .iter()
        .map(|agent| Greeter::new(agent.name.clone(), Arc::clone(&env)))
        .collect();

    let reports = config
        .runtime()
        .run_sequential(&mut agents, &ShutdownListener::never())?;

    eprintln!("\n{}", "=== Key Points ===".bold());
    for report in &reports {
        eprintln!("{} ran {} cycles", report.name.cyan(), report.cycles);
    }
    eprintln!("1. A loop that never returns starves every agent after it");
    eprintln!("2. Agents share the environment but not the control flow");
    Ok(())
}
