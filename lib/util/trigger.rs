use std::sync::atomic::{AtomicBool, Ordering};

/// A switch that can be pulled once from any thread and never reset.
#[derive(Debug, Default)]
pub struct Trigger {
    pulled: AtomicBool,
}

impl Trigger {
    /// A trigger that has not been pulled.
    #[inline(always)]
    pub const fn new() -> Self {
        Trigger {
            pulled: AtomicBool::new(false),
        }
    }

    /// Pulls the trigger, returning `true` if this call is the one that pulled it.
    #[inline(always)]
    pub fn pull(&self) -> bool {
        !self.pulled.swap(true, Ordering::Relaxed)
    }

    /// Whether the trigger has been pulled.
    #[inline(always)]
    pub fn is_pulled(&self) -> bool {
        self.pulled.load(Ordering::Relaxed)
    }
}
