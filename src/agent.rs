//! Agents: one perceive/decide/act cycle per `step`.
//!
//! Loops, sleeps and threads belong to the runtime; an agent only knows how
//! to take a single step.

use std::sync::Arc;

use tracing::debug;

use crate::environment::{GreetingEnvironment, SharedCounterEnvironment};
use crate::error::AgentError;
use crate::trigger::Trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Acted,
    Idle,
}

pub trait Agent {
    fn name(&self) -> &str;

    fn step(&mut self) -> Result<Step, AgentError>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn step(&mut self) -> Result<Step, AgentError> {
        (**self).step()
    }
}

/// Says hello every time it is stepped.
pub struct Greeter {
    name: String,
    env: Arc<GreetingEnvironment>,
}

impl Greeter {
    pub fn new(name: impl Into<String>, env: Arc<GreetingEnvironment>) -> Self {
        Self {
            name: name.into(),
            env,
        }
    }
}

impl Agent for Greeter {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self) -> Result<Step, AgentError> {
        self.env.act(&format!("Agent {} says hello!", self.name));
        Ok(Step::Acted)
    }
}

/// Reads the shared counter and increases it when its trigger fires.
pub struct CounterAgent {
    name: String,
    trigger: Trigger,
    env: Arc<SharedCounterEnvironment>,
    belief: Option<i64>,
}

impl CounterAgent {
    pub fn new(
        name: impl Into<String>,
        trigger: Trigger,
        env: Arc<SharedCounterEnvironment>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger,
            env,
            belief: None,
        }
    }

    /// The value seen by the most recent step.
    pub fn belief(&self) -> Option<i64> {
        self.belief
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }
}

impl Agent for CounterAgent {
    fn name(&self) -> &str {
        &self.name
    }

    /// The read happens outside the lock, so by the time `increase` runs
    /// another agent may already have changed the value this decision was
    /// based on. The race is kept on purpose: it is what the exercise shows.
    fn step(&mut self) -> Result<Step, AgentError> {
        let perceived = self.env.read();
        self.belief = Some(perceived);

        if !self.trigger.fires(perceived) {
            return Ok(Step::Idle);
        }

        let increment = self.env.increase(&self.name)?;
        debug!(
            agent = %self.name,
            perceived,
            amount = increment.amount,
            value = increment.value,
            "increased counter"
        );
        Ok(Step::Acted)
    }
}
