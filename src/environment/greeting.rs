use std::sync::Arc;

use crate::console::Console;

/// The environment of the first exercises: acting means saying something.
pub struct GreetingEnvironment {
    console: Arc<dyn Console>,
}

impl GreetingEnvironment {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self { console }
    }

    pub fn act(&self, message: &str) {
        self.console.say(message);
    }
}
