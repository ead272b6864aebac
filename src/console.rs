//! Where agents' lines end up.
//!
//! Agents and environments never print directly: they talk to a `Console`,
//! so the binaries can write to stdout while tests keep a transcript.

use std::sync::Mutex;

pub trait Console: Send + Sync {
    fn say(&self, line: &str);
}

/// Writes every line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Console for Stdout {
    fn say(&self, line: &str) {
        println!("{}", line);
    }
}

/// Records lines in memory, in the order they were said.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        // A panic elsewhere cannot leave a half-pushed line behind.
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Console for Transcript {
    fn say(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_keeps_order() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.say("first");
        transcript.say("second");

        assert_eq!(transcript.lines(), vec!["first", "second"]);
        assert_eq!(transcript.len(), 2);
    }
}
