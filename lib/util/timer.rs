use std::time::{Duration, Instant};

/// A countdown towards a deadline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Constructs a timer that never elapses.
    #[inline(always)]
    pub const fn infinite() -> Self {
        Timer { deadline: None }
    }

    /// Constructs a timer that elapses after the given duration.
    ///
    /// Durations too long to be represented never elapse.
    #[inline(always)]
    pub fn new(duration: Duration) -> Self {
        Timer {
            deadline: Instant::now().checked_add(duration),
        }
    }

    /// The time remaining, if any.
    #[inline(always)]
    pub fn remaining(&self) -> Option<Duration> {
        match self.deadline {
            None => Some(Duration::MAX),
            Some(deadline) => deadline.checked_duration_since(Instant::now()),
        }
    }
}
