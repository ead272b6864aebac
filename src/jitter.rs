use std::time::Duration;

use rand::Rng;

/// Pause between two agent cycles, drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    min: Duration,
    max: Duration,
}

impl Jitter {
    /// Reversed bounds are swapped.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::from_millis(100, 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_within_bounds() {
        let jitter = Jitter::from_millis(100, 500);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let delay = jitter.sample(&mut rng);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(500));
        }
    }

    #[test]
    fn test_sub_microsecond_bounds_are_kept() {
        let jitter = Jitter::new(Duration::from_nanos(100), Duration::from_nanos(900));
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let delay = jitter.sample(&mut rng);
            assert!(delay >= Duration::from_nanos(100), "{:?}", delay);
            assert!(delay <= Duration::from_nanos(900), "{:?}", delay);
        }
    }

    #[test]
    fn test_fixed_and_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let fixed = Jitter::fixed(Duration::from_millis(100));
        assert_eq!(fixed.sample(&mut rng), Duration::from_millis(100));
        assert_eq!(Jitter::none().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let jitter = Jitter::from_millis(500, 100);
        assert_eq!(jitter.min(), Duration::from_millis(100));
        assert_eq!(jitter.max(), Duration::from_millis(500));
    }
}
