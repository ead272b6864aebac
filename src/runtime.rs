//! Driving agents: in sequence, in shuffled rounds, or one thread each.

use std::thread::{self, JoinHandle};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info};

use crate::agent::{Agent, Step};
use crate::error::AgentError;
use crate::jitter::Jitter;
use crate::random::make_rng;
use crate::shutdown::{self, SharedTrigger, ShutdownListener};

/// How long each agent loop may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// `None` runs until shutdown.
    pub max_cycles: Option<u64>,
    pub jitter: Jitter,
}

impl Limits {
    pub fn new(max_cycles: Option<u64>, jitter: Jitter) -> Self {
        Self { max_cycles, jitter }
    }

    fn allows(&self, cycles: u64) -> bool {
        self.max_cycles.map_or(true, |max| cycles < max)
    }
}

/// What an agent did before its loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    pub name: String,
    pub cycles: u64,
    pub actions: u64,
}

impl AgentReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cycles: 0,
            actions: 0,
        }
    }

    fn record(&mut self, step: Step) {
        self.cycles += 1;
        if step == Step::Acted {
            self.actions += 1;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Runtime {
    limits: Limits,
    seed: Option<u64>,
}

impl Runtime {
    pub fn new(limits: Limits) -> Self {
        Self { limits, seed: None }
    }

    /// Makes jitter and shuffling reproducible.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Runs each agent's whole loop before starting the next one.
    ///
    /// Without a cycle limit the first agent never hands over.
    pub fn run_sequential<A: Agent>(
        &self,
        agents: &mut [A],
        shutdown: &ShutdownListener,
    ) -> Result<Vec<AgentReport>, AgentError> {
        let mut reports = Vec::with_capacity(agents.len());
        for (index, agent) in agents.iter_mut().enumerate() {
            let mut rng = make_rng(self.seed, index as u64)?;
            reports.push(drive(agent, &self.limits, &mut rng, shutdown)?);
            if shutdown.is_shutdown() {
                break;
            }
        }
        Ok(reports)
    }

    /// Steps every agent once per round, in a fresh random order each round.
    ///
    /// The cycle limit counts rounds. Reports keep the order of `agents`.
    pub fn run_shuffled<A: Agent>(
        &self,
        agents: &mut [A],
        shutdown: &ShutdownListener,
    ) -> Result<Vec<AgentReport>, AgentError> {
        if agents.is_empty() {
            return Ok(Vec::new());
        }

        let mut rng = make_rng(self.seed, 0)?;
        let mut reports: Vec<AgentReport> =
            agents.iter().map(|agent| AgentReport::new(agent.name())).collect();
        let mut order: Vec<usize> = (0..agents.len()).collect();
        let mut rounds = 0;

        'rounds: while self.limits.allows(rounds) && !shutdown.is_shutdown() {
            order.shuffle(&mut rng);
            for &index in &order {
                let step = agents[index].step()?;
                reports[index].record(step);
                if shutdown.sleep(self.limits.jitter.sample(&mut rng)) {
                    break 'rounds;
                }
            }
            rounds += 1;
        }

        Ok(reports)
    }

    /// Starts one named thread per agent.
    ///
    /// An agent that fails or panics shuts the whole run down, so `join`
    /// reports its error instead of waiting on the others forever.
    /// If a thread fails to start, the ones already running are shut down
    /// and joined before the error is returned.
    pub fn spawn<A>(&self, agents: Vec<A>) -> Result<RuntimeHandle, AgentError>
    where
        A: Agent + Send + 'static,
    {
        let (trigger, listener) = shutdown::channel();
        let trigger = SharedTrigger::new(trigger);
        let mut handle = RuntimeHandle {
            trigger: trigger.clone(),
            threads: Vec::with_capacity(agents.len()),
        };

        for (index, mut agent) in agents.into_iter().enumerate() {
            let name = agent.name().to_string();
            let limits = self.limits;
            let seed = self.seed;
            let listener = listener.clone();
            let trigger = trigger.clone();

            let spawned = thread::Builder::new()
                .name(format!("agent-{}", name))
                .spawn(move || -> Result<AgentReport, AgentError> {
                    let _on_panic = FireOnPanic(trigger.clone());
                    let outcome = make_rng(seed, index as u64)
                        .and_then(|mut rng| drive(&mut agent, &limits, &mut rng, &listener));
                    if outcome.is_err() {
                        trigger.fire();
                    }
                    outcome
                });

            match spawned {
                Ok(thread) => handle.threads.push((name, thread)),
                Err(source) => {
                    handle.shutdown();
                    // The spawn failure is the error worth reporting.
                    let _ = handle.join();
                    return Err(AgentError::Spawn { name, source });
                }
            }
        }

        Ok(handle)
    }
}

/// Running agent threads.
#[derive(Debug)]
pub struct RuntimeHandle {
    trigger: SharedTrigger,
    threads: Vec<(String, JoinHandle<Result<AgentReport, AgentError>>)>,
}

impl RuntimeHandle {
    /// Asks every agent to stop after its current step.
    pub fn shutdown(&mut self) {
        self.trigger.fire();
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Waits for every agent and returns their reports in spawn order,
    /// or the first error if any agent failed.
    pub fn join(mut self) -> Result<Vec<AgentReport>, AgentError> {
        let mut reports = Vec::with_capacity(self.threads.len());
        let mut first_error = None;

        for (name, thread) in self.threads.drain(..) {
            let outcome = match thread.join() {
                Ok(outcome) => outcome,
                Err(_) => Err(AgentError::AgentPanicked { name }),
            };
            match outcome {
                Ok(report) => reports.push(report),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(reports),
        }
    }
}

// Agent threads hold their own clones of the trigger, so a dropped handle
// has to fire it explicitly.
impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        self.trigger.fire();
    }
}

/// Fires the run's shutdown if the agent thread unwinds.
struct FireOnPanic(SharedTrigger);

impl Drop for FireOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.fire();
        }
    }
}

/// One agent's loop: step, then sleep the jitter, until the cycle limit or
/// shutdown.
fn drive<A, R>(
    agent: &mut A,
    limits: &Limits,
    rng: &mut R,
    shutdown: &ShutdownListener,
) -> Result<AgentReport, AgentError>
where
    A: Agent + ?Sized,
    R: Rng + ?Sized,
{
    let mut report = AgentReport::new(agent.name());
    info!(agent = %report.name, "agent started");

    while limits.allows(report.cycles) && !shutdown.is_shutdown() {
        let step = agent.step().map_err(|err| {
            error!(agent = %report.name, error = %err, "agent stopped on error");
            err
        })?;
        report.record(step);
        debug!(agent = %report.name, cycle = report.cycles, ?step, "cycle done");

        if shutdown.sleep(limits.jitter.sample(rng)) {
            break;
        }
    }

    info!(
        agent = %report.name,
        cycles = report.cycles,
        actions = report.actions,
        "agent finished"
    );
    Ok(report)
}
