//! Fixed-window admission control.
//!
//! # Responsibilities
//! - Decide admit/reject for one client key in O(1)
//! - Reset windows on rollover (and on backward clock jumps)
//! - Bound store growth via the idle-eviction sweep
//!
//! # Design Decisions
//! - Fixed-window counter: O(1) memory and per-request cost; the window
//!   boundary is a hard cliff, accepted for forum-scale traffic
//! - A rejected request is not counted — the budget only tracks admissions
//! - Eviction cadence and idle threshold are constants, not tunables

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use crate::config::RateLimitConfig;
use crate::observability::metrics;

use super::clock::{Clock, SystemClock};
use super::store::{ClientKey, LimiterStore};

/// Windows a client must stay idle before its entry is dropped.
const EVICT_IDLE_WINDOWS: u32 = 4;

/// Outcome of one admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Forward the request. `remaining` is the budget left in this window.
    Admitted { remaining: u32 },
    /// Short-circuit with 429. `retry_after` is the time until the window
    /// resets.
    Rejected { retry_after: Duration },
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted { .. })
    }
}

/// Process-wide request admission controller.
///
/// Constructed once at startup, shared behind an `Arc` by every request task
/// and by the eviction sweep. Unrelated clients only ever contend on the
/// store's shard locks.
pub struct RateLimiter {
    store: LimiterStore,
    max_requests: u32,
    window: Duration,
    clock: Box<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Construct with an explicit time source.
    pub fn with_clock(config: &RateLimitConfig, clock: impl Clock) -> Self {
        Self {
            store: LimiterStore::new(),
            max_requests: config.max_requests,
            window: config.window(),
            clock: Box::new(clock),
        }
    }

    /// Decide whether to admit one request from `key`.
    ///
    /// The read-check-write runs under the store entry's lock, so decisions
    /// for one client are consistent with their arrival order and no
    /// admissions are lost or double-counted under concurrency.
    pub fn check(&self, key: ClientKey) -> Decision {
        let now = self.clock.now();
        let max_requests = self.max_requests;
        let window = self.window;

        self.store.with_entry(key, now, |state| {
            // Rollover, or the clock moved backwards: start a fresh window.
            match now.checked_duration_since(state.window_start) {
                Some(elapsed) if elapsed < window => {}
                _ => {
                    state.count = 0;
                    state.window_start = now;
                }
            }
            state.last_seen = now;

            if state.count >= max_requests {
                let elapsed = now
                    .checked_duration_since(state.window_start)
                    .unwrap_or(Duration::ZERO);
                Decision::Rejected {
                    retry_after: window.saturating_sub(elapsed),
                }
            } else {
                state.count += 1;
                Decision::Admitted {
                    remaining: max_requests - state.count,
                }
            }
        })
    }

    /// Drop entries idle for more than [`EVICT_IDLE_WINDOWS`] windows.
    pub fn evict_idle(&self) -> usize {
        let idle_for = self.window * EVICT_IDLE_WINDOWS;
        let cutoff = match self.clock.now().checked_sub(idle_for) {
            Some(cutoff) => cutoff,
            // Process younger than the idle threshold: nothing can be stale.
            None => return 0,
        };
        self.store.evict_idle(cutoff)
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }

    /// Periodic eviction sweep, one pass per window duration.
    ///
    /// Runs until the shutdown signal fires. Spawned by the server next to
    /// the listener; never blocks the request path beyond the store's
    /// shard-at-a-time `retain`.
    pub async fn run_eviction(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.window);
        // The first tick fires immediately; skip it, there is nothing to do.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let dropped = self.evict_idle();
                    let tracked = self.tracked_clients();
                    metrics::set_tracked_clients(tracked);
                    if dropped > 0 {
                        tracing::debug!(dropped, tracked, "Evicted idle rate-limit entries");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Eviction sweep stopping");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::clock::manual::ManualClock;
    use std::net::IpAddr;

    fn config(max_requests: u32, window_secs: u64) -> RateLimitConfig {
        RateLimitConfig {
            max_requests,
            window_secs,
        }
    }

    fn ip(s: &str) -> ClientKey {
        ClientKey::Ip(s.parse::<IpAddr>().unwrap())
    }

    #[test]
    fn admits_up_to_threshold() {
        let limiter = RateLimiter::new(&config(3, 60));

        assert_eq!(
            limiter.check(ip("1.2.3.4")),
            Decision::Admitted { remaining: 2 }
        );
        assert_eq!(
            limiter.check(ip("1.2.3.4")),
            Decision::Admitted { remaining: 1 }
        );
        assert_eq!(
            limiter.check(ip("1.2.3.4")),
            Decision::Admitted { remaining: 0 }
        );
        assert!(!limiter.check(ip("1.2.3.4")).is_admitted());
    }

    #[test]
    fn clients_are_isolated() {
        let limiter = RateLimiter::new(&config(2, 60));

        limiter.check(ip("1.2.3.4"));
        limiter.check(ip("1.2.3.4"));
        assert!(!limiter.check(ip("1.2.3.4")).is_admitted());

        // A's exhausted quota leaves B untouched.
        assert!(limiter.check(ip("5.6.7.8")).is_admitted());
    }

    #[test]
    fn window_rollover_resets_the_count() {
        let clock = ManualClock::start_now();
        let limiter = RateLimiter::with_clock(&config(2, 60), clock.clone());

        limiter.check(ip("1.2.3.4"));
        limiter.check(ip("1.2.3.4"));
        assert!(!limiter.check(ip("1.2.3.4")).is_admitted());

        clock.advance(Duration::from_secs(61));
        assert_eq!(
            limiter.check(ip("1.2.3.4")),
            Decision::Admitted { remaining: 1 }
        );
    }

    #[test]
    fn rejections_do_not_consume_budget() {
        let clock = ManualClock::start_now();
        let limiter = RateLimiter::with_clock(&config(2, 60), clock.clone());

        limiter.check(ip("1.2.3.4"));
        limiter.check(ip("1.2.3.4"));
        // Hammer well past the threshold; none of these count.
        for _ in 0..10 {
            assert!(!limiter.check(ip("1.2.3.4")).is_admitted());
        }

        // The next window starts with the full budget.
        clock.advance(Duration::from_secs(60));
        assert_eq!(
            limiter.check(ip("1.2.3.4")),
            Decision::Admitted { remaining: 1 }
        );
    }

    #[test]
    fn retry_after_counts_down_within_the_window() {
        let clock = ManualClock::start_now();
        let limiter = RateLimiter::with_clock(&config(1, 60), clock.clone());

        limiter.check(ip("1.2.3.4"));
        clock.advance(Duration::from_secs(45));
        match limiter.check(ip("1.2.3.4")) {
            Decision::Rejected { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(15));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn backward_clock_jump_resets_instead_of_underflowing() {
        let clock = ManualClock::start_now();
        // Leave room below the start so rewinding is well-defined.
        clock.advance(Duration::from_secs(3600));
        let limiter = RateLimiter::with_clock(&config(1, 60), clock.clone());

        limiter.check(ip("1.2.3.4"));
        assert!(!limiter.check(ip("1.2.3.4")).is_admitted());

        // now < window_start must read as an immediate reset, not a
        // negative remaining window.
        clock.rewind(Duration::from_secs(120));
        assert!(limiter.check(ip("1.2.3.4")).is_admitted());
    }

    #[test]
    fn concurrent_same_key_requests_never_overshoot() {
        let limiter = Arc::new(RateLimiter::new(&config(10, 60)));
        let mut handles = Vec::new();

        for _ in 0..40 {
            let limiter = limiter.clone();
            handles.push(std::thread::spawn(move || {
                limiter.check(ip("1.2.3.4")).is_admitted()
            }));
        }

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(admitted, 10, "no lost updates, no double counting");
    }

    #[test]
    fn unknown_clients_share_one_counter() {
        let limiter = RateLimiter::new(&config(1, 60));

        assert!(limiter.check(ClientKey::Unknown).is_admitted());
        assert!(!limiter.check(ClientKey::Unknown).is_admitted());
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn eviction_drops_idle_clients_only() {
        let clock = ManualClock::start_now();
        clock.advance(Duration::from_secs(3600));
        let limiter = RateLimiter::with_clock(&config(5, 60), clock.clone());

        limiter.check(ip("1.2.3.4"));
        clock.advance(Duration::from_secs(60 * 5));
        limiter.check(ip("5.6.7.8"));
        assert_eq!(limiter.tracked_clients(), 2);

        // Only the client idle past four windows goes away.
        assert_eq!(limiter.evict_idle(), 1);
        assert_eq!(limiter.tracked_clients(), 1);
        assert!(limiter.check(ip("5.6.7.8")).is_admitted());
    }
}
