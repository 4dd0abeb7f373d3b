//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, defaults when absent)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ForumConfig (validated, immutable)
//!     → shared with subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the only admission-control tunables
//!   are the rate-limit threshold and window
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AssetConfig, ForumConfig, ListenerConfig, ObservabilityConfig, RateLimitConfig, TlsConfig,
};
