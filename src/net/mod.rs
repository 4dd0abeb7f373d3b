//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     tls.rs (load PEM material, pin the TLS 1.2 floor)
//!     → axum-server binds and terminates TLS
//!     → decrypted requests hand off to the HTTP layer
//! ```

pub mod tls;

pub use tls::{load_tls_config, TlsError};
