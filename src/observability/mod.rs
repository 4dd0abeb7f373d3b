//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (admission counters, limiter gauge)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape of the metrics listener (when enabled)
//! ```

pub mod logging;
pub mod metrics;
