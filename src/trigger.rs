use std::fmt;
use std::sync::Arc;

/// Decides, from a perceived value, whether an agent acts this cycle.
#[derive(Clone)]
pub enum Trigger {
    Always,
    Odd,
    Even,
    Custom(Arc<dyn Fn(i64) -> bool + Send + Sync>),
}

impl Trigger {
    pub fn custom(predicate: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        Trigger::Custom(Arc::new(predicate))
    }

    pub fn fires(&self, perceived: i64) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Odd => perceived % 2 != 0,
            Trigger::Even => perceived % 2 == 0,
            Trigger::Custom(predicate) => predicate(perceived),
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Always => f.write_str("Always"),
            Trigger::Odd => f.write_str("Odd"),
            Trigger::Even => f.write_str("Even"),
            Trigger::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
