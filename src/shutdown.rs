//! Cancellation for agent loops.
//!
//! The signal is a crossbeam channel that never carries a message. Dropping
//! the only sender disconnects every receiver, so a listener blocked in
//! `recv_timeout` wakes up at once instead of finishing its sleep.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Fires the shutdown when dropped or when `fire` is called.
#[derive(Debug)]
pub struct ShutdownTrigger {
    _sender: Sender<()>,
}

impl ShutdownTrigger {
    pub fn fire(self) {}
}

/// A trigger that every holder may fire, e.g. each agent thread of a run.
#[derive(Debug, Clone)]
pub struct SharedTrigger {
    slot: Arc<Mutex<Option<ShutdownTrigger>>>,
}

impl SharedTrigger {
    pub fn new(trigger: ShutdownTrigger) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(trigger))),
        }
    }

    /// Fires the shutdown. Later calls do nothing.
    pub fn fire(&self) {
        // The slot only ever goes from Some to None, so a poisoned lock is still usable.
        let trigger = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        drop(trigger);
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownListener {
    receiver: Receiver<()>,
}

pub fn channel() -> (ShutdownTrigger, ShutdownListener) {
    let (sender, receiver) = channel::bounded(0);
    (
        ShutdownTrigger { _sender: sender },
        ShutdownListener { receiver },
    )
}

impl ShutdownListener {
    /// A listener whose shutdown never comes.
    pub fn never() -> Self {
        Self {
            receiver: channel::never(),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleeps for `delay` and returns `true` if shutdown fired before it elapsed.
    pub fn sleep(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            return self.is_shutdown();
        }
        matches!(
            self.receiver.recv_timeout(delay),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}
