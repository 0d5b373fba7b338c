//! Time and randomness sources mixed into candidate codes.
//!
//! Both are owned by a [`CodeGenerator`](super::CodeGenerator) and shared by
//! every worker calling it, so implementations must be `Send + Sync`.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// High-resolution timestamp source, in nanoseconds.
pub trait Clock: Send + Sync {
    fn now_nanos(&self) -> i64;
}

/// Full-width random integer source.
pub trait EntropySource: Send + Sync {
    fn next_u64(&self) -> u64;
}

/// Wall clock that never repeats or goes backwards.
///
/// Two calls landing in the same timer tick still get distinct values: the
/// result is `max(wall_clock, previous + 1)`.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let wall = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(i64::MAX);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Draws from the thread-local RNG, so workers never contend on a shared lock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl EntropySource for ThreadRngSource {
    fn next_u64(&self) -> u64 {
        rand::random::<u64>()
    }
}

/// Clock frozen at a single instant. For tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_nanos(&self) -> i64 {
        self.0
    }
}

/// Entropy source that always yields the same value. For tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub u64);

impl EntropySource for FixedEntropy {
    fn next_u64(&self) -> u64 {
        self.0
    }
}

/// Entropy source yielding `start, start + 1, ...`. For tests that need
/// reproducible but non-repeating inputs.
#[derive(Debug, Default)]
pub struct SequenceEntropy {
    next: AtomicU64,
}

impl SequenceEntropy {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl EntropySource for SequenceEntropy {
    fn next_u64(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
