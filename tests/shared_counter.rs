//! Concurrent behavior of the shared counter.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use mas_agents::{
    Console, CounterAgent, FixedAmount, Jitter, Limits, RandomAmount, Runtime,
    SharedCounterEnvironment, Transcript, Trigger, AMOUNTS,
};

fn values(transcript: &Transcript) -> Vec<i64> {
    transcript
        .lines()
        .iter()
        .filter_map(|line| line.strip_prefix("  --> "))
        .map(|value| value.parse().unwrap())
        .collect()
}

fn amounts(transcript: &Transcript) -> Vec<i64> {
    transcript
        .lines()
        .iter()
        .filter(|line| line.starts_with("Agent "))
        .map(|line| line.rsplit(' ').next().unwrap().parse().unwrap())
        .collect()
}

#[test]
fn test_two_actors_hundred_increments_each() {
    let transcript = Arc::new(Transcript::new());
    let env = Arc::new(SharedCounterEnvironment::new(
        FixedAmount::new(1).unwrap(),
        transcript.clone(),
    ));
    let start = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["Alice", "Bob"]
        .into_iter()
        .map(|name| {
            let env = Arc::clone(&env);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for _ in 0..100 {
                    env.increment_by(name, 1).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(env.read(), 200);
    let seen = values(&transcript);
    assert_eq!(seen, (1..=200).collect::<Vec<i64>>());
}

#[test]
fn test_concurrent_random_increments_lose_nothing() {
    let transcript = Arc::new(Transcript::new());
    let env = Arc::new(SharedCounterEnvironment::new(
        RandomAmount::new(None).unwrap(),
        transcript.clone(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let env = Arc::clone(&env);
            thread::spawn(move || {
                let name = format!("agent-{}", i);
                (0..250)
                    .map(|_| i64::from(env.increase(&name).unwrap().amount))
                    .sum::<i64>()
            })
        })
        .collect();

    let applied: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(env.read(), applied);
    assert_eq!(amounts(&transcript).iter().sum::<i64>(), applied);

    // Consecutive values never jump by more than one increment.
    let seen = values(&transcript);
    assert_eq!(seen.len(), 2_000);
    let mut previous = 0;
    for value in seen {
        let step = value - previous;
        assert!(AMOUNTS.contains(&(step as u32)), "jump of {}", step);
        previous = value;
    }
}

#[test]
fn test_unguarded_reads_are_monotonic() {
    let env = Arc::new(SharedCounterEnvironment::new(
        RandomAmount::new(Some(9)).unwrap(),
        Arc::new(Transcript::new()),
    ));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let env = Arc::clone(&env);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = 0;
            let mut reads = 0u64;
            while !done.load(Ordering::Acquire) {
                let value = env.read();
                assert!(value >= last, "read {} after {}", value, last);
                last = value;
                reads += 1;
            }
            (last, reads)
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let env = Arc::clone(&env);
            thread::spawn(move || {
                let name = format!("writer-{}", i);
                (0..500)
                    .map(|_| i64::from(env.increase(&name).unwrap().amount))
                    .sum::<i64>()
            })
        })
        .collect();

    let applied: i64 = writers.into_iter().map(|h| h.join().unwrap()).sum();
    done.store(true, Ordering::Release);
    let (last_read, reads) = reader.join().unwrap();

    assert!(reads > 0);
    assert!(last_read <= applied);
    assert_eq!(env.read(), applied);
}

/// Counts how many critical sections are open at once. Both lines of an
/// increment are said with the lock held, so the first opens a section and
/// the second closes it.
#[derive(Default)]
struct OverlapCounter {
    open: AtomicUsize,
    peak: AtomicUsize,
}

impl Console for OverlapCounter {
    fn say(&self, line: &str) {
        if line.starts_with("Agent ") {
            let now = self.open.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::yield_now();
        } else {
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_critical_sections_never_overlap() {
    let overlap = Arc::new(OverlapCounter::default());
    let env = Arc::new(SharedCounterEnvironment::new(
        RandomAmount::new(None).unwrap(),
        overlap.clone(),
    ));
    let start = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let env = Arc::clone(&env);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                let name = format!("agent-{}", i);
                start.wait();
                for _ in 0..300 {
                    env.increase(&name).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(overlap.peak.load(Ordering::SeqCst), 1);
    assert_eq!(overlap.open.load(Ordering::SeqCst), 0);
}

#[test]
fn test_odd_and_even_agents_under_the_runtime() {
    let transcript = Arc::new(Transcript::new());
    let env = Arc::new(SharedCounterEnvironment::new(
        RandomAmount::new(Some(3)).unwrap(),
        transcript.clone(),
    ));
    let agents = vec![
        CounterAgent::new("Alice", Trigger::Odd, Arc::clone(&env)),
        CounterAgent::new("Bob", Trigger::Even, Arc::clone(&env)),
    ];

    let runtime = Runtime::new(Limits::new(Some(200), Jitter::none())).with_seed(Some(3));
    let reports = runtime.spawn(agents).unwrap().join().unwrap();

    assert!(reports.iter().all(|r| r.cycles == 200));
    let actions: u64 = reports.iter().map(|r| r.actions).sum();
    assert!(actions >= 1, "Bob sees 0 first, so someone must act");

    let applied = amounts(&transcript);
    assert_eq!(applied.len() as u64, actions);
    assert_eq!(env.read(), applied.iter().sum::<i64>());
}
