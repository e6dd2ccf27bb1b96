use std::sync::atomic::{AtomicU64, Ordering};

/// Counts events towards a limit, possibly from many threads at once.
#[derive(Debug)]
pub struct Counter {
    counted: AtomicU64,
    limit: u64,
}

impl Counter {
    /// Constructs a counter that allows `limit` counts.
    pub fn new(limit: u64) -> Self {
        Counter {
            counted: AtomicU64::new(0),
            limit,
        }
    }

    /// Counts once and returns how many counts remain, or [`None`] if the limit was reached.
    pub fn count(&self) -> Option<u64> {
        let limit = self.limit;
        let previous = self
            .counted
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| {
                (c < limit).then_some(c + 1)
            })
            .ok()?;

        Some(limit - previous - 1)
    }

    /// How many times this counter has been counted, up to its limit.
    pub fn counted(&self) -> u64 {
        self.counted.load(Ordering::Relaxed)
    }
}
