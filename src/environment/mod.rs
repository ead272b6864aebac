//! Environments agents perceive and act upon.

mod counter;
mod greeting;

pub use counter::{Increment, SharedCounterEnvironment};
pub use greeting::GreetingEnvironment;
