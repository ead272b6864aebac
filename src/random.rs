use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AgentError;

/// Amounts a guarded increment may add.
pub const AMOUNTS: RangeInclusive<u32> = 1..=4;

/// Produces the amount of the next increment. Called with the counter lock held.
pub trait AmountSource: Send {
    fn next_amount(&mut self) -> u32;
}

/// Uniform amounts in `AMOUNTS`.
#[derive(Debug)]
pub struct RandomAmount {
    rng: StdRng,
}

impl RandomAmount {
    /// Seeds from `seed` when given, otherwise from the thread-local generator.
    pub fn new(seed: Option<u64>) -> Result<Self, AgentError> {
        Ok(Self {
            rng: make_rng(seed, 0)?,
        })
    }
}

impl AmountSource for RandomAmount {
    fn next_amount(&mut self) -> u32 {
        self.rng.gen_range(AMOUNTS)
    }
}

/// Always the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAmount(u32);

impl FixedAmount {
    pub fn new(amount: u32) -> Result<Self, AgentError> {
        if AMOUNTS.contains(&amount) {
            Ok(Self(amount))
        } else {
            Err(AgentError::InvalidAmount { amount })
        }
    }

    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl AmountSource for FixedAmount {
    fn next_amount(&mut self) -> u32 {
        self.0
    }
}

/// Builds a generator for one stream of a run.
///
/// With a seed every stream is reproducible and distinct; without one the
/// generator is seeded from `thread_rng`, which fails only if the OS entropy
/// source does.
pub fn make_rng(seed: Option<u64>, stream: u64) -> Result<StdRng, AgentError> {
    match seed {
        Some(seed) => Ok(StdRng::seed_from_u64(seed.wrapping_add(stream))),
        None => Ok(StdRng::from_rng(rand::thread_rng())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_amounts_stay_in_range() {
        let mut source = RandomAmount::new(None).unwrap();
        for _ in 0..1_000 {
            assert!(AMOUNTS.contains(&source.next_amount()));
        }
    }

    #[test]
    fn test_random_amounts_cover_range() {
        let mut source = RandomAmount::new(Some(11)).unwrap();
        let mut seen = [false; 4];
        for _ in 0..1_000 {
            seen[(source.next_amount() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomAmount::new(Some(42)).unwrap();
        let mut b = RandomAmount::new(Some(42)).unwrap();
        let first: Vec<u32> = (0..20).map(|_| a.next_amount()).collect();
        let second: Vec<u32> = (0..20).map(|_| b.next_amount()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_amount_bounds() {
        assert_eq!(FixedAmount::new(1).unwrap().amount(), 1);
        assert_eq!(FixedAmount::new(4).unwrap().amount(), 4);
        assert!(matches!(
            FixedAmount::new(0),
            Err(AgentError::InvalidAmount { amount: 0 })
        ));
        assert!(matches!(
            FixedAmount::new(5),
            Err(AgentError::InvalidAmount { amount: 5 })
        ));
    }
}
