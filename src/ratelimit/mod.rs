//! Request admission control.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → middleware.rs (derive ClientKey, consult limiter)
//!     → limiter.rs (fixed-window decision under the entry lock)
//!     → store.rs (per-client counters, DashMap-sharded)
//!     → Admitted: delegate to the router
//!     → Rejected: 429 + Retry-After, handler never runs
//!
//! Background:
//!     limiter.rs eviction sweep drops idle entries each window
//! ```
//!
//! # Design Decisions
//! - One shared limiter for the whole process, wrapped around the router
//! - Fixed-window counting: hard cliff at the boundary, O(1) everything
//! - Fail closed on unknown clients (shared fallback key)
//! - Time injected via clock.rs so tests control rollover

pub mod clock;
pub mod limiter;
pub mod middleware;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use limiter::{Decision, RateLimiter};
pub use middleware::admission;
pub use store::{ClientKey, ClientState, LimiterStore};
