//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Build server → Serve
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT)
//!     → shutdown.rs broadcast trigger
//!     → server drains with a bounded grace period
//!     → eviction sweep stops
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
