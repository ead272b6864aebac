use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::console::Console;
use crate::error::AgentError;
use crate::random::{AmountSource, AMOUNTS};

/// One applied increment: how much was added and what the value became.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment {
    pub amount: u32,
    pub value: i64,
}

/// A single integer shared by every agent.
///
/// Writes happen only while `lock` is held. Reads skip the lock and may see
/// a value that another agent is about to change, but never a torn one.
pub struct SharedCounterEnvironment {
    value: AtomicI64,
    // Guards `value` as well as the amount generator.
    lock: Mutex<Box<dyn AmountSource>>,
    console: Arc<dyn Console>,
}

type Held<'a> = MutexGuard<'a, Box<dyn AmountSource>>;

impl SharedCounterEnvironment {
    pub fn new(amounts: impl AmountSource + 'static, console: Arc<dyn Console>) -> Self {
        Self {
            value: AtomicI64::new(0),
            lock: Mutex::new(Box::new(amounts)),
            console,
        }
    }

    /// Current value, read without taking the lock.
    pub fn read(&self) -> i64 {
        self.value.load(Ordering::Acquire)
    }

    /// Adds an amount drawn from the environment's generator.
    pub fn increase(&self, name: &str) -> Result<Increment, AgentError> {
        let mut held = self.acquire()?;
        let amount = held.next_amount();
        if !AMOUNTS.contains(&amount) {
            return Err(AgentError::InvalidAmount { amount });
        }
        Ok(self.apply(&held, name, amount))
    }

    /// Adds a caller-chosen amount and returns the new value.
    pub fn increment_by(&self, name: &str, amount: u32) -> Result<i64, AgentError> {
        if !AMOUNTS.contains(&amount) {
            return Err(AgentError::InvalidAmount { amount });
        }
        let held = self.acquire()?;
        Ok(self.apply(&held, name, amount).value)
    }

    fn acquire(&self) -> Result<Held<'_>, AgentError> {
        self.lock.lock().map_err(|_| AgentError::LockPoisoned)
    }

    // Taking the guard proves the caller is inside the critical section.
    fn apply(&self, _held: &Held<'_>, name: &str, amount: u32) -> Increment {
        self.console
            .say(&format!("Agent {} increase the value by {}", name, amount));
        let value = self.value.load(Ordering::Relaxed) + i64::from(amount);
        self.value.store(value, Ordering::Release);
        self.console.say(&format!("  --> {}", value));
        Increment { amount, value }
    }
}
