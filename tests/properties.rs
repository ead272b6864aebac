use std::sync::Arc;
use std::thread;

use mas_agents::{FixedAmount, SharedCounterEnvironment, Transcript};
use proptest::prelude::*;

prop_compose! {
    // Up to 6 actors, each with its own list of amounts in 1..=4.
    fn workloads()(
        work in prop::collection::vec(prop::collection::vec(1u32..=4, 0..40), 1..=6)
    ) -> Vec<Vec<u32>> {
        work
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_final_value_is_sum_of_amounts(work in workloads()) {
        let env = Arc::new(SharedCounterEnvironment::new(
            FixedAmount::new(1).unwrap(),
            Arc::new(Transcript::new()),
        ));
        let expected: i64 = work.iter().flatten().map(|&a| i64::from(a)).sum();

        let handles: Vec<_> = work
            .into_iter()
            .enumerate()
            .map(|(i, amounts)| {
                let env = Arc::clone(&env);
                thread::spawn(move || {
                    let name = format!("agent-{}", i);
                    for amount in amounts {
                        env.increment_by(&name, amount).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        prop_assert_eq!(env.read(), expected);
    }

    #[test]
    fn test_every_returned_value_is_within_total(amounts in prop::collection::vec(1u32..=4, 1..100)) {
        let env = SharedCounterEnvironment::new(
            FixedAmount::new(1).unwrap(),
            Arc::new(Transcript::new()),
        );
        let mut previous = 0;
        let mut total = 0;
        for amount in amounts {
            total += i64::from(amount);
            let value = env.increment_by("Alice", amount).unwrap();
            prop_assert_eq!(value, total);
            prop_assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_out_of_range_amounts_never_apply(amount in 5u32..=u32::MAX) {
        let env = SharedCounterEnvironment::new(
            FixedAmount::new(1).unwrap(),
            Arc::new(Transcript::new()),
        );
        prop_assert!(env.increment_by("Alice", amount).is_err());
        prop_assert_eq!(env.read(), 0);
    }
}
