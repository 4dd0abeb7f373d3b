//! Injectable time source for window accounting.
//!
//! The limiter never reads the system clock directly; it goes through
//! [`Clock`] so tests can drive window rollover without real delays.

use std::time::Instant;

/// Monotonic time source consulted on every admission decision.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::Clock;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Hand-cranked clock for deterministic window tests.
    ///
    /// Clones share the same underlying instant, so a test can keep one
    /// handle and hand another to the limiter.
    #[derive(Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        pub fn start_now() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().expect("manual clock mutex poisoned");
            *now += by;
        }

        /// Move the clock backwards, simulating wall-clock skew.
        pub fn rewind(&self, by: Duration) {
            let mut now = self.now.lock().expect("manual clock mutex poisoned");
            *now -= by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().expect("manual clock mutex poisoned")
        }
    }
}
